use std::fmt;

use crate::models::UserSummary;
use crate::session::{SearchSession, SessionState};

pub const LOAD_MORE_HINT: &str = "Type `more` to load more users.";

/// One user card.
pub struct UserCard<'a>(pub &'a UserSummary);

impl fmt::Display for UserCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let user = self.0;
        writeln!(f, "- {}", user.login)?;
        writeln!(f, "    Avatar: {}", user.avatar_url)?;
        if let Some(location) = user.location.as_deref().filter(|l| !l.is_empty()) {
            writeln!(f, "    Location: {}", location)?;
        }
        match user.public_repos {
            Some(count) => writeln!(f, "    Repositories: {}", count)?,
            None => writeln!(f, "    Repositories: N/A")?,
        }
        writeln!(f, "    View Profile: {}", user.html_url)
    }
}

/// The whole session: status line, accumulated users, footer.
pub struct SessionView<'a>(pub &'a SearchSession);

impl fmt::Display for SessionView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.0;

        if session.is_loading() {
            writeln!(f, "Loading...")?;
        }
        if let Some(err) = session.last_error() {
            writeln!(f, "{}", err)?;
        }

        if session.state() == SessionState::Idle && session.generation() > 0 && session.results().is_empty() {
            writeln!(f, "No users found.")?;
        }
        for user in session.results() {
            write!(f, "{}", UserCard(user))?;
        }

        if !session.results().is_empty() {
            writeln!(
                f,
                "Showing {} of {} users.",
                session.results().len(),
                session.total_available()
            )?;
        }
        if session.can_load_more() {
            writeln!(f, "{}", LOAD_MORE_HINT)?;
        }
        Ok(())
    }
}

pub fn render_session(session: &SearchSession) -> String {
    SessionView(session).to_string()
}
