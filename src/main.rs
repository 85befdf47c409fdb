//! hearth binary entry point.

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let code = hearthwork::cli::run().await;
    std::process::exit(code);
}
