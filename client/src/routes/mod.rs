use std::fmt;

/// Client-side pages the shell can show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Login,
    Signup,
    Subreddits,
    Community(String),
    Post(String),
    Profile,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_owned(),
            Self::Login => "/login".to_owned(),
            Self::Signup => "/signup".to_owned(),
            Self::Subreddits => "/subreddits".to_owned(),
            Self::Community(name) => format!("/r/{name}"),
            Self::Post(id) => format!("/post/{id}"),
            Self::Profile => "/profile".to_owned(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
