#[tokio::main]
async fn main() -> anyhow::Result<()> {
    mortgage_calculator_api::cli::run_with_sys_args().await
}
