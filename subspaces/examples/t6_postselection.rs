#[path = "../tests/common/mod.rs"]
mod common;

use bitrel::BitString;
use common::t6_support;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use subspaces::{LocalEditMap, MeasurementVerifier, SubspaceSystem};

const SEED: u64 = 42;
const SHOTS: usize = 1000;

fn main() -> Result<(), subspaces::Error> {
    env_logger::init();

    let t6 = t6_support();
    let length = 8;
    let system = (0..length - 2)
        .map(|site| LocalEditMap::new(&t6, [site, site + 1, site + 2]))
        .collect::<Result<SubspaceSystem, _>>()?;

    let initial_condition: BitString = "00110100".parse()?;
    let verifier = MeasurementVerifier::new(&system, initial_condition, length)?;
    println!("initial condition {initial_condition}, representative {}", verifier.target());

    // Drift inside the subspace, then flip each bit with a small probability
    let mut rng = SmallRng::seed_from_u64(SEED);
    let subspace: Vec<BitString> = system.transitive_closure(&initial_condition, None)?.into_iter().collect();
    let mut outcomes = Vec::with_capacity(SHOTS);
    for _ in 0..SHOTS {
        let mut value = subspace[rng.gen_range(0..subspace.len())].value();
        for site in 0..length {
            if rng.gen_bool(0.02) {
                value ^= 1 << site;
            }
        }
        outcomes.push(BitString::new(value, length)?);
    }

    let kept = verifier.post_select(&outcomes)?;
    println!("kept {} of {SHOTS} shots", kept.len());
    println!("acceptance rate {:.3}", verifier.acceptance_rate(&outcomes)?);
    Ok(())
}
