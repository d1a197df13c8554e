#[path = "../tests/common/mod.rs"]
mod common;

use common::exchange_support;
use itertools::Itertools;
use subspaces::{LocalEditMap, SubspaceSystem};

fn main() -> Result<(), subspaces::Error> {
    env_logger::init();

    // Heisenberg XXX exchange on every nearest-neighbor pair
    let exchange = exchange_support();
    let length = 6;
    let system = (0..length - 1)
        .map(|site| LocalEditMap::new(&exchange, [site, site + 1]))
        .collect::<Result<SubspaceSystem, _>>()?;
    print!("{system}");

    let partition = system.partition(length)?;
    println!(
        "{} subspaces with sizes {}",
        partition.len(),
        partition.sizes().iter().join(", ")
    );
    for class in &partition {
        let weight = class.iter().next().map_or(0, |state| state.value().count_ones());
        println!("  weight {weight}: {} states", class.len());
    }
    Ok(())
}
