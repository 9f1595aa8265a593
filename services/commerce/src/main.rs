use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use common::database::{DatabaseConfig, init_pool};

use commerce::{
    auth_client::AuthServiceClient,
    config::AppConfig,
    repositories::{
        customer::CustomerRepository, order::OrderRepository, payment::PaymentRepository,
        product::ProductRepository, shipment::ShipmentRepository,
    },
    routes,
    services::{orders::OrderService, shipments::ShipmentService},
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting commerce service");

    let config = AppConfig::from_env();

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Initialize repositories
    let product_repository = ProductRepository::new(pool.clone());
    let order_repository = OrderRepository::new(pool.clone());
    let payment_repository = PaymentRepository::new(pool.clone());
    let shipment_repository = ShipmentRepository::new(pool.clone());
    let customer_repository = CustomerRepository::new(pool.clone());

    // The authentication service owns user identity; orders are validated
    // against it over HTTP before anything is written.
    let auth_client = AuthServiceClient::new(config.auth_api_url.clone())?;
    let order_service = OrderService::new(order_repository.clone(), auth_client.clone());
    let shipment_service =
        ShipmentService::new(shipment_repository.clone(), order_repository.clone());

    info!("Commerce service initialized successfully");

    let bind_addr = config.bind_addr.clone();
    let app_state = AppState {
        db_pool: pool,
        config,
        product_repository,
        order_repository,
        payment_repository,
        shipment_repository,
        customer_repository,
        order_service,
        shipment_service,
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Commerce service listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
