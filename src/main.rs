// pageintent - what is this page, and why did you open it

use pageintent::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("{e:?}");
        std::process::exit(1);
    }
}
