use std::sync::Arc;

use url::Url;

use crate::{
    errors::ClientError,
    gateway::{Gateway, HttpGateway},
    services::{CommentsService, CommunitiesService, PostsService, ProfilesService, UsersService},
    session::Session,
};

/// Everything a form or page needs: the session and one service per resource,
/// all sharing a single gateway.
#[derive(Clone)]
pub struct ClientState {
    pub session: Session,
    pub users: UsersService,
    pub communities: CommunitiesService,
    pub posts: PostsService,
    pub comments: CommentsService,
    pub profiles: ProfilesService,
}

impl ClientState {
    pub fn new(gateway: Arc<dyn Gateway>, session: Session) -> Self {
        Self {
            session,
            users: UsersService::new(gateway.clone()),
            communities: CommunitiesService::new(gateway.clone()),
            posts: PostsService::new(gateway.clone()),
            comments: CommentsService::new(gateway.clone()),
            profiles: ProfilesService::new(gateway),
        }
    }

    /// Wire the services to a live backend at `api_url`.
    pub fn connect(api_url: &Url) -> Result<Self, ClientError> {
        let session = Session::new();
        let gateway = HttpGateway::new(api_url, session.clone())?;
        Ok(Self::new(Arc::new(gateway), session))
    }
}
