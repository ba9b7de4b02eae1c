#[tokio::main]
async fn main() {
    let path = std::env::args().nth(1);

    match billed_lib::run(path).await {
        Ok(html) => println!("{html}"),
        Err(e) => {
            log::error!("起動に失敗しました: {} (重要度: {:?})", e.details(), e.severity());
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
    }
}
