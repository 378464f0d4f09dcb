//! Line-oriented front end: pages are commands, forms are field prompts.

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::{
    app::App,
    errors::SubmitError,
    feedback::{Feedback, NotificationKind},
    forms::{
        DeleteAccountForm, DeleteCommunityForm, EditPostForm, LoginForm, NewCommentForm,
        NewCommunityForm, NewPostForm, SignupForm, delete_comment, delete_post,
    },
    pages,
    routes::Route,
};

const HELP: &str = "\
Pages:    home | subreddits | community NAME | post ID | profile
Account:  signup | login | logout | whoami | delete-account
Content:  new-community | delete-community | new-post | edit-post ID | delete-post ID
Comments: comment POST_ID | delete-comment POST_ID COMMENT_ID
Other:    help | quit";

enum Flow {
    Continue,
    Quit,
}

pub struct Shell<R, W> {
    app: App,
    input: Lines<R>,
    out: W,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(app: App, input: R, out: W) -> Self {
        Self {
            app,
            input: input.lines(),
            out,
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Read commands until `quit` or end of input.
    pub async fn run(&mut self) -> io::Result<()> {
        writeln!(self.out, "Forum client. Type `help` for commands.")?;
        loop {
            write!(self.out, "{}> ", self.app.route())?;
            self.out.flush()?;
            let Some(line) = self.input.next_line().await? else {
                break;
            };
            if let Flow::Quit = self.dispatch(line.trim()).await? {
                break;
            }
        }
        Ok(())
    }

    async fn dispatch(&mut self, line: &str) -> io::Result<Flow> {
        let (command, argument) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match (command, argument) {
            ("", _) => {}
            ("quit" | "exit", _) => return Ok(Flow::Quit),
            ("help", _) => writeln!(self.out, "{HELP}")?,
            ("home", _) => self.show_home().await?,
            ("subreddits", _) => self.show_subreddits().await?,
            ("community", name) if !name.is_empty() => self.show_community(name).await?,
            ("post", id) if !id.is_empty() => self.show_post(id).await?,
            ("profile", _) => self.show_profile().await?,
            ("signup", _) => self.signup().await?,
            ("login", _) => self.login().await?,
            ("logout", _) => {
                let notification = self.app.logout();
                self.print_notification(notification.kind, &notification.message)?;
            }
            ("whoami", _) => match self.app.state().session.current_user() {
                Some(username) => writeln!(self.out, "Logged in as {username}")?,
                None => writeln!(self.out, "Not logged in")?,
            },
            ("delete-account", _) => self.delete_account().await?,
            ("new-community", _) => self.new_community().await?,
            ("delete-community", _) => self.delete_community().await?,
            ("new-post", _) => self.new_post().await?,
            ("edit-post", id) if !id.is_empty() => self.edit_post(id).await?,
            ("delete-post", id) if !id.is_empty() => {
                let feedback = delete_post(self.app.state(), id).await;
                self.apply(feedback)?;
            }
            ("comment", post_id) if !post_id.is_empty() => self.new_comment(post_id).await?,
            ("delete-comment", ids) => match ids.split_once(char::is_whitespace) {
                Some((post_id, comment_id)) => {
                    let feedback =
                        delete_comment(self.app.state(), post_id, comment_id.trim()).await;
                    self.apply(feedback)?;
                }
                None => writeln!(self.out, "Usage: delete-comment POST_ID COMMENT_ID")?,
            },
            (command, _) => writeln!(self.out, "Unknown command `{command}`. Try `help`.")?,
        }
        Ok(Flow::Continue)
    }

    async fn show_home(&mut self) -> io::Result<()> {
        self.app.navigate(Route::Home);
        let result = pages::home_feed(self.app.state()).await;
        match result {
            Ok(posts) if posts.is_empty() => writeln!(self.out, "No posts yet."),
            Ok(posts) => {
                for post in posts {
                    writeln!(
                        self.out,
                        "[{}] {} (r/{}, by {}, score {})",
                        post.post_id.as_deref().unwrap_or("?"),
                        post.title,
                        post.community,
                        post.username,
                        post.score()
                    )?;
                }
                Ok(())
            }
            Err(feedback) => self.apply(feedback),
        }
    }

    async fn show_subreddits(&mut self) -> io::Result<()> {
        self.app.navigate(Route::Subreddits);
        let result = pages::communities(self.app.state()).await;
        match result {
            Ok(communities) => {
                for community in communities {
                    writeln!(self.out, "r/{}: {}", community.name, community.description)?;
                }
                Ok(())
            }
            Err(feedback) => self.apply(feedback),
        }
    }

    async fn show_community(&mut self, name: &str) -> io::Result<()> {
        self.app.navigate(Route::Community(name.to_owned()));
        let result = pages::community(self.app.state(), name).await;
        match result {
            Ok(community) => writeln!(
                self.out,
                "r/{}\n{}\n{} members, {} posts",
                community.name,
                community.description,
                community.members_count,
                community.posts_count
            ),
            Err(feedback) => self.apply(feedback),
        }
    }

    async fn show_post(&mut self, id: &str) -> io::Result<()> {
        self.app.navigate(Route::Post(id.to_owned()));
        let result = pages::post(self.app.state(), id).await;
        match result {
            Ok(pages::PostPage { post, comments }) => {
                writeln!(
                    self.out,
                    "{}\nr/{} by {} | score {} | {} comments\n\n{}",
                    post.title,
                    post.community,
                    post.username,
                    post.score(),
                    post.comments_count,
                    post.body
                )?;
                for comment in comments {
                    writeln!(
                        self.out,
                        "  [{}] {}: {}{}",
                        comment.id.as_deref().unwrap_or("?"),
                        comment.username,
                        comment.text,
                        if comment.edited { " (edited)" } else { "" }
                    )?;
                }
                Ok(())
            }
            Err(feedback) => self.apply(feedback),
        }
    }

    async fn show_profile(&mut self) -> io::Result<()> {
        let result = pages::profile(self.app.state()).await;
        match result {
            Ok(profile) => {
                self.app.navigate(Route::Profile);
                writeln!(
                    self.out,
                    "{}\nName:  {}\nEmail: {}",
                    profile.username,
                    profile.full_name(),
                    profile.email
                )
            }
            Err(feedback) => self.apply(feedback),
        }
    }

    async fn signup(&mut self) -> io::Result<()> {
        self.app.navigate(Route::Signup);
        let mut form = SignupForm::new();
        let Some(username) = self.ask("Username").await? else {
            return Ok(());
        };
        let Some(password) = self.ask_secret("Password").await? else {
            return Ok(());
        };
        form.fields_mut().username = username;
        form.fields_mut().password = password;
        let result = form.submit(self.app.state()).await;
        self.conclude(result)
    }

    async fn login(&mut self) -> io::Result<()> {
        self.app.navigate(Route::Login);
        let mut form = LoginForm::new();
        let Some(username) = self.ask("Username").await? else {
            return Ok(());
        };
        let Some(password) = self.ask_secret("Password").await? else {
            return Ok(());
        };
        form.fields_mut().username = username;
        form.fields_mut().password = password;
        let result = form.submit(self.app.state()).await;
        self.conclude(result)
    }

    async fn delete_account(&mut self) -> io::Result<()> {
        let mut form = DeleteAccountForm::new();
        let Some(username) = self.ask("Type your username to confirm").await? else {
            return Ok(());
        };
        form.fields_mut().username = username;
        let result = form.submit(self.app.state()).await;
        self.conclude(result)
    }

    async fn new_community(&mut self) -> io::Result<()> {
        let mut form = NewCommunityForm::new();
        let Some(name) = self.ask("Name").await? else {
            return Ok(());
        };
        let Some(description) = self.ask("Description (optional)").await? else {
            return Ok(());
        };
        form.fields_mut().name = name;
        form.fields_mut().description = description;
        let result = form.submit(self.app.state()).await;
        self.conclude(result)
    }

    async fn delete_community(&mut self) -> io::Result<()> {
        let mut form = DeleteCommunityForm::new(&self.app.state().session);
        if form.fields().username.is_empty() {
            let Some(username) = self.ask("Username").await? else {
                return Ok(());
            };
            form.fields_mut().username = username;
        }
        let Some(name) = self.ask("Community name").await? else {
            return Ok(());
        };
        form.fields_mut().name = name;
        let result = form.submit(self.app.state()).await;
        self.conclude(result)
    }

    async fn new_post(&mut self) -> io::Result<()> {
        let mut form = NewPostForm::new(&self.app.state().session);
        let result = pages::communities(self.app.state()).await;
        match result {
            Ok(communities) => {
                for (index, community) in communities.iter().enumerate() {
                    writeln!(self.out, "  {}. r/{}", index + 1, community.name)?;
                }
                form.set_communities(communities);
            }
            Err(feedback) => self.apply(feedback)?,
        }

        if form.fields().username.is_empty() {
            let Some(username) = self.ask("Username").await? else {
                return Ok(());
            };
            form.fields_mut().username = username;
        }
        let Some(community) = self.ask("Community (number or name)").await? else {
            return Ok(());
        };
        let picked = community
            .parse::<usize>()
            .ok()
            .and_then(|number| number.checked_sub(1))
            .and_then(|index| form.choose_community(index))
            .is_some();
        if !picked {
            form.fields_mut().community = community;
        }
        let Some(title) = self.ask("Title").await? else {
            return Ok(());
        };
        let Some(body) = self.ask("Body").await? else {
            return Ok(());
        };
        form.fields_mut().title = title;
        form.fields_mut().body = body;
        let result = form.submit(self.app.state()).await;
        self.conclude(result)
    }

    async fn new_comment(&mut self, post_id: &str) -> io::Result<()> {
        let mut form = NewCommentForm::new(post_id, &self.app.state().session);
        if form.fields().username.is_empty() {
            let Some(username) = self.ask("Username").await? else {
                return Ok(());
            };
            form.fields_mut().username = username;
        }
        let Some(text) = self.ask("Comment").await? else {
            return Ok(());
        };
        form.fields_mut().text = text;
        let result = form.submit(self.app.state()).await;
        self.conclude(result)
    }

    async fn edit_post(&mut self, id: &str) -> io::Result<()> {
        let result = pages::post_content(self.app.state(), id).await;
        let post = match result {
            Ok(post) => post,
            Err(feedback) => return self.apply(feedback),
        };
        let mut form = EditPostForm::new(id, &post);
        let Some(title) = self.ask(&format!("Title [{}]", post.title)).await? else {
            return Ok(());
        };
        let Some(body) = self.ask("Body (blank keeps current)").await? else {
            return Ok(());
        };
        if !title.is_empty() {
            form.fields_mut().title = title;
        }
        if !body.is_empty() {
            form.fields_mut().body = body;
        }
        let result = form.submit(self.app.state()).await;
        self.conclude(result)
    }

    /// Prompt for one field. `None` when input ran out.
    async fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.out, "{label}: ")?;
        self.out.flush()?;
        Ok(self
            .input
            .next_line()
            .await?
            .map(|line| line.trim().to_owned()))
    }

    /// Prompt for a password. The value is never written back to `out`; the
    /// terminal's own echo stays on because input is read as plain lines.
    async fn ask_secret(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.out, "{label} (not hidden while typing): ")?;
        self.out.flush()?;
        Ok(self.input.next_line().await?)
    }

    fn conclude(&mut self, result: Result<Feedback, SubmitError>) -> io::Result<()> {
        match result {
            Ok(feedback) => self.apply(feedback),
            Err(SubmitError::Invalid(errors)) => {
                writeln!(self.out, "Please fix the form:\n{errors}")
            }
            Err(SubmitError::InFlight) => {
                writeln!(self.out, "Still waiting on the previous submission.")
            }
        }
    }

    fn apply(&mut self, feedback: Feedback) -> io::Result<()> {
        let redirected = feedback.redirect.is_some();
        let notification = self.app.apply(feedback);
        self.print_notification(notification.kind, &notification.message)?;
        if redirected {
            writeln!(self.out, "-> {}", self.app.route())?;
        }
        Ok(())
    }

    fn print_notification(&mut self, kind: NotificationKind, message: &str) -> io::Result<()> {
        let tag = match kind {
            NotificationKind::Success => "ok",
            NotificationKind::Failure => "error",
            NotificationKind::Info => "info",
        };
        writeln!(self.out, "[{tag}] {message}")
    }
}
