#[tokio::main]
async fn main() {
    restaurant_ordering_server::axum().await;
}
