//! Grow, prune and select a regression tree
//!
//! ```text
//! cargo run --example cost_complexity -- auto-mpg auto-mpg.data
//! cargo run --example cost_complexity -- winequality winequality-red.csv
//! ```
//!
//! Without arguments a generated step dataset is used. Set `RUST_LOG=debug` to follow the
//! folds.
use std::env;

use sylva::prelude::*;
use sylva_cart::CrossValidatedTree;
use sylva_datasets::{generate, load, Format};

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let dataset = match args.as_slice() {
        [format, path] if format == "auto-mpg" => load(path, Format::AutoMpg)?,
        [format, path] if format == "winequality" => {
            load(path, Format::WineQuality { delimiter: b';' })?
        }
        [] => generate::step_dataset(200, 10., 2., 42),
        _ => return Err("usage: cost_complexity [auto-mpg|winequality <path>]".into()),
    };

    println!(
        "{} samples with attributes {:?}, target {}",
        dataset.nsamples(),
        dataset.feature_names(),
        dataset.schema().target()
    );

    let selection = CrossValidatedTree::params().n_folds(10).fit(&dataset)?;

    println!("alpha\tleaves\ttest rmse");
    for ((tree, alpha), rmse) in selection.path().iter().zip(selection.test_rmses()) {
        println!("{:.4}\t{}\t{:.4}", alpha, tree.num_leaves(), rmse);
    }

    println!(
        "\nselected alpha {:.4} with test rmse {:.4}\n",
        selection.alpha(),
        selection.test_rmse()
    );
    println!("{}", selection.tree());

    Ok(())
}
