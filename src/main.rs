use courseboard::cli;
use courseboard::logging::init_tracing;
use courseboard::metrics::{init_metrics, metrics_app};
use courseboard::router::init_router;
use courseboard::state::init_app_state;
use dotenvy::dotenv;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    // CLI commands run without the server
    if args.len() > 1 {
        match args[1].as_str() {
            "create-admin" => {
                handle_create_admin(args).await;
                return;
            }
            "seed" => {
                handle_seed().await;
                return;
            }
            _ => {}
        }
    }

    init_tracing();

    let metrics_handle = init_metrics();

    let state = init_app_state().await;
    let mut app = init_router(state);

    if let Some(handle) = metrics_handle {
        app = app.merge(metrics_app(handle));
    }

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    println!("🚀 Server running on http://localhost:3000");
    println!("📚 Swagger UI available at http://localhost:3000/swagger-ui");
    println!("📖 Scalar UI available at http://localhost:3000/scalar");
    axum::serve(listener, app).await.unwrap();
}

async fn connect_pool() -> sqlx::PgPool {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

async fn handle_create_admin(args: Vec<String>) {
    if args.len() != 5 {
        eprintln!("Usage: {} create-admin <name> <email> <password>", args[0]);
        std::process::exit(1);
    }

    let name = &args[2];
    let email = &args[3];
    let password = &args[4];

    let pool = connect_pool().await;

    match cli::create_admin(&pool, name, email, password).await {
        Ok(_) => {
            println!("✅ Admin created successfully!");
            println!("   Email: {}", email);
            println!("   Name: {}", name);
        }
        Err(e) => {
            eprintln!("❌ Error creating admin: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed() {
    let pool = connect_pool().await;

    if let Err(e) = cli::seeder::seed_all(&pool, cli::seeder::SeedConfig::default()).await {
        eprintln!("❌ Seeding failed: {}", e);
        std::process::exit(1);
    }
}
