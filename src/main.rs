use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    telebridge::cli::run().await
}
