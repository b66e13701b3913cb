use topclient::core::config::ClientConfig;
use topclient::{params, TopClient};

/// Reads `TOP_APPKEY` / `TOP_APPSECRET`, falling back to placeholder sandbox credentials
fn load_config() -> ClientConfig {
    #[cfg(feature = "env-file")]
    let loaded = ClientConfig::from_env_file("TOP");
    #[cfg(not(feature = "env-file"))]
    let loaded = ClientConfig::from_env("TOP");

    loaded.unwrap_or_else(|_| ClientConfig::new("your_appkey", "your_appsecret").sandbox(true))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let client = TopClient::new(load_config())?;
    println!("Router endpoint: {}", client.config().endpoint());

    match client
        .user_get(params! { "fields" => "nick,seller_credit", "nick" => "sandbox_c_1" })
        .await
    {
        Ok(user) if user.is_null() => println!("User not found"),
        Ok(user) => println!("User: {}", user),
        Err(e) => println!("Error fetching user ({}): {}", e.kind(), e),
    }

    match client
        .users(params! { "fields" => "nick,sex", "nicks" => "sandbox_c_1,sandbox_c_2" })
        .await
    {
        Ok(users) => {
            println!("Found {} users", users.len());
            for user in users.iter().take(5) {
                println!("  {}", user.nick.as_deref().unwrap_or("<no nick>"));
            }
        }
        Err(e) => println!("Error fetching users: {}", e),
    }

    Ok(())
}
