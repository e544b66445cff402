use anyhow::Result;
use vergen::EmitBuilder;

// Git metadata for `tracker_decoder --version`
fn main() -> Result<()> {
    EmitBuilder::builder().git_sha(true).git_branch().emit()?;
    Ok(())
}
