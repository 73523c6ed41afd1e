use crate::{config::Config, error, spotify};

pub fn auth_url() {
    match spotify::auth::authorization_url(&Config::from_env()) {
        Ok(url) => println!("{}", url),
        Err(e) => error!("Cannot build authorization URL. Err: {}", e),
    }
}
