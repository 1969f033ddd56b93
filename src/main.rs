use std::error::Error;

use bulletin_board::{
    board::Post,
    config::{Command, Config},
    threads::{create_thread, display_threads},
    unit, BoardClient, PostFeed, ThreadCollection,
};
use log::{debug, error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::parse();
    config.init_logger();
    info!("# Bulletin Board #");
    info!("{}", config.base_url());
    info!("");

    let client = BoardClient::new(&config);
    let locale = config.locale();

    match &config.command {
        Command::List { page, page_size, .. } => {
            let mut threads = ThreadCollection::new(*page_size);
            if let Err(e) = unit!("Loading threads", threads.load(&client).await) {
                debug!("{}", e);
                let message = e.summary(locale);
                error!("{}", message);
                return Err(message.into());
            }
            if let Some(query) = config.command.thread_query() {
                threads.set_query(query);
            }
            if !threads.set_page(*page) {
                info!("Page {} does not exist, showing page 1", page);
            }
            display_threads(&threads);
        }
        Command::New { title } => {
            match unit!("Creating thread", create_thread(&client, title).await) {
                Ok(thread) => info!("Created {} ({})", thread.title, thread.id),
                Err(e) => {
                    debug!("{}", e);
                    let message =
                        e.localized(locale, ("スレッドの作成に失敗しました", "Failed to create thread"));
                    error!("{}", message);
                    return Err(message.into());
                }
            }
        }
        Command::Show { thread_id, pages } => {
            let mut feed = PostFeed::new(&client, locale);
            let result = unit!("Loading posts", {
                let mut result = feed.initialize(thread_id).await;
                for _ in 1..*pages {
                    match feed.load_more().await {
                        Ok(true) => {}
                        Ok(false) => break,
                        Err(e) => {
                            result = Err(e);
                            break;
                        }
                    }
                }
                result
            });
            display_posts(feed.posts());
            if let Err(e) = result {
                error!("{} ({})", e.message(locale), e.code);
                return Err(e.message(locale).into());
            }
            if feed.has_more() {
                info!("More posts available (--pages {})", pages + 1);
            }
        }
        Command::Post { thread_id, text } => {
            let mut feed = PostFeed::new(&client, locale);
            if let Err(e) = feed.initialize(thread_id).await {
                error!("{} ({})", e.message(locale), e.code);
                return Err(e.message(locale).into());
            }
            match unit!("Submitting post", feed.submit(text).await) {
                Ok(post) => {
                    info!("Posted {}", post.id);
                    display_posts(feed.posts());
                }
                Err(e) => {
                    debug!("{}", e);
                    let message = feed
                        .submit_error()
                        .map(str::to_string)
                        .unwrap_or_else(|| e.summary(locale));
                    error!("{}", message);
                    return Err(message.into());
                }
            }
        }
    }

    info!("All done!");
    Ok(())
}

fn display_posts(posts: &[Post]) {
    if posts.is_empty() {
        info!("No posts");
        return;
    }
    for post in posts {
        info!("[{}] {}", post.id, post.post);
    }
}
