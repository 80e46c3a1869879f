use resource_server::Resource;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    resource_server::run(Resource::Order).await
}
