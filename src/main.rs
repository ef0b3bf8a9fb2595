use anyhow::Result;

fn main() -> Result<()> {
    strata::cli::run()
}
