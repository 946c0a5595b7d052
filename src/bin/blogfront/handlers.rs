#![deny(clippy::all, clippy::pedantic)]

use blogfront::application::{AppError, PostActions};
use blogfront::config::PostsCmd;
use blogfront::types::{BlogPost, Envelope, PostQuery};
use serde::Serialize;

use crate::io::read_credentials;
use crate::print::print_json;

/// Which side of the envelope a command printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Data,
    Error,
}

pub async fn posts(actions: &PostActions, cmd: PostsCmd) -> Result<Outcome, AppError> {
    match cmd {
        PostsCmd::List {
            search,
            page,
            limit,
            featured,
        } => {
            let query = PostQuery {
                is_featured: featured,
                search,
                page,
                limit,
            };
            emit(&actions.get_posts(Some(&query), None).await)
        }
        PostsCmd::Get { id } => emit(&actions.get_post(&id).await),
        PostsCmd::Create {
            title,
            content,
            tags,
            cookie_file,
            cookie_env,
        } => {
            let credentials = read_credentials(cookie_file, cookie_env)?;
            let payload = BlogPost::from_form(&title, &content, &tags);
            emit(&actions.create_post(&payload, &credentials).await)
        }
    }
}

fn emit<T: Serialize>(envelope: &Envelope<T>) -> Result<Outcome, AppError> {
    print_json(envelope)?;
    Ok(if envelope.is_data() {
        Outcome::Data
    } else {
        Outcome::Error
    })
}
