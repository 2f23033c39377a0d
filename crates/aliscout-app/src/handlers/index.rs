/// Liveness text
pub async fn index() -> &'static str {
    "AliExpress Translator API is running!"
}

pub async fn health() -> &'static str {
    "OK"
}
