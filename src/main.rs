use anyhow::Result;

use textlift::app::Command;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let command = Command::parse(std::env::args())?;
    textlift::run(command).await?;
    Ok(())
}
