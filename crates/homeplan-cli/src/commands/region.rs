use clap::Args;
use serde_json::{json, Value};

use homeplan_core::region::RegionTable;

use crate::input;

/// Arguments for listing the districts of a province
#[derive(Args, Debug)]
pub struct DistrictsArgs {
    /// Province name
    #[arg(long)]
    pub province: String,

    /// Region reference file (JSON); defaults to the built-in table
    #[arg(long)]
    pub regions: Option<String>,
}

/// Arguments for listing the neighborhoods of a district
#[derive(Args, Debug)]
pub struct NeighborhoodsArgs {
    /// Province name
    #[arg(long)]
    pub province: String,

    /// District name
    #[arg(long)]
    pub district: String,

    /// Region reference file (JSON); defaults to the built-in table
    #[arg(long)]
    pub regions: Option<String>,
}

pub fn run_districts(args: DistrictsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    with_table(args.regions.as_deref(), |table| {
        json!({
            "province": args.province,
            "districts": table.districts_of(&args.province),
        })
    })
}

pub fn run_neighborhoods(args: NeighborhoodsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    with_table(args.regions.as_deref(), |table| {
        json!({
            "province": args.province,
            "district": args.district,
            "neighborhoods": table.neighborhoods_of(&args.province, &args.district),
        })
    })
}

fn with_table(
    path: Option<&str>,
    f: impl FnOnce(&RegionTable) -> Value,
) -> Result<Value, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let resolved = input::file::resolve_path(path)?;
            let table = RegionTable::load(resolved)?;
            Ok(f(&table))
        }
        None => Ok(f(RegionTable::builtin()?)),
    }
}
