//! Lists the five most recent service tickets.
//!
//! Connection settings come from the environment: CRM_BASE_URL,
//! CRM_CLIENT_ID, CRM_CLIENT_SECRET, CRM_SECURITY_TOKEN, CRM_USERNAME,
//! CRM_PASSWORD. Without credentials the demo set is printed.

use crm_client::{ClientConfig, HttpCrmGateway, SessionManager, SessionStorage, TicketService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let base_url =
        std::env::var("CRM_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".into());
    let config = ClientConfig::new(base_url)
        .with_credentials(env_or_empty("CRM_CLIENT_ID"), env_or_empty("CRM_CLIENT_SECRET"))
        .with_security_token(env_or_empty("CRM_SECURITY_TOKEN"));

    let storage = SessionStorage::new(std::env::temp_dir().join("crm-client-example"));
    let manager = SessionManager::new(&config, storage)?;

    if let (Ok(username), Ok(password)) =
        (std::env::var("CRM_USERNAME"), std::env::var("CRM_PASSWORD"))
    {
        manager.login(&username, &password).await?;
    }

    let session = manager.current();
    let gateway = HttpCrmGateway::new(&config, session.as_ref())?;
    let service = TicketService::from_config(gateway, &config);

    for ticket in service.list().await? {
        println!(
            "[{}] {} ({} / {})",
            ticket.id,
            ticket.title,
            ticket.type_label(),
            ticket.status_label()
        );
    }
    Ok(())
}

fn env_or_empty(key: &str) -> String {
    std::env::var(key).unwrap_or_default()
}
