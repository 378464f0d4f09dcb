use std::sync::Arc;

use crate::{
    dto::Envelope,
    errors::ClientError,
    gateway::{Gateway, resource_path},
};

const PROFILE_PATH: &str = "profile";

#[derive(Clone)]
pub struct ProfilesService {
    gateway: Arc<dyn Gateway>,
}

impl ProfilesService {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// GET /profile/:username
    pub async fn get(&self, username: &str) -> Result<Envelope, ClientError> {
        let path = resource_path(PROFILE_PATH, username)?;
        self.gateway.get(&path, &[]).await
    }
}
