/// GET /health - 健康检查
pub async fn health_check() -> &'static str {
    "OK!"
}
