pub async fn welcome() -> &'static str {
    "Welcome to my movies list!"
}
