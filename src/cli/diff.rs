//! Diff command - compare a file with a proposed replacement

use anyhow::Result;

use crate::context::read_file;
use crate::diff::generate_diff;
use crate::ui;

pub fn run(original: &str, proposed: &str, plain: bool) -> Result<()> {
    let before = read_file(original)?;
    let after = read_file(proposed)?;
    let diff = generate_diff(&before, &after);

    if plain {
        println!("{}", diff);
    } else {
        ui::print_diff(&diff);
    }

    Ok(())
}
