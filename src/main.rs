#[tokio::main]
async fn main() -> anyhow::Result<()> {
    profilefetch::cli::run().await
}
