//! Initial data loading for development environments.
//!
//! When `LOAD_INITIAL_DATA=true`, existing users are cleared (so ids restart
//! at 1) and a small set of sample accounts is created through the regular
//! service path.

use domain_users::{User, UserRepository, UserService};
use tracing::info;

pub async fn load_initial_data<R: UserRepository>(service: &UserService<R>) -> eyre::Result<()> {
    info!("Deleting existing data...");
    service.clear().await?;

    info!("Loading initial data...");
    let users = sample_users();
    let count = users.len();
    for user in users {
        service.upsert(user).await?;
    }

    info!("Created {} users.", count);
    info!("Initial data loaded successfully.");
    Ok(())
}

fn sample_user(name: &str, email: &str, first_name: &str, last_name: &str) -> User {
    User {
        id: None,
        created_at: None,
        updated_at: None,
        name: name.to_string(),
        email_address: email.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
    }
}

fn sample_users() -> Vec<User> {
    vec![
        sample_user(
            "mmustermann",
            "max.mustermann@example.com",
            "Max",
            "Mustermann",
        ),
        sample_user(
            "emusterfrau",
            "erika.musterfrau@example.com",
            "Erika",
            "Musterfrau",
        ),
        sample_user("jdoe", "jane.doe@example.com", "Jane", "Doe"),
    ]
}
