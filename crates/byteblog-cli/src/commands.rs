use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use byteblog_client::{ApiClient, FileTokenStore, SessionManager, User};
use byteblog_config::Config;
use byteblog_engine::{
    BlogPost, ContentBlock, ContentParser, DashboardStats, HtmlRenderer, NewsQuery, Page, Render,
};
use byteblog_proxy::ProxyState;

use crate::reader::{self, App, PostLoader};
use crate::terminal::{TerminalRenderer, line_text};
use crate::{Command, Format, RemoteCommand};

pub async fn run(command: Command, config: &Config) -> Result<()> {
    let parser = ContentParser::with_default_language(&config.default_code_language);

    match command {
        Command::Render {
            file,
            format,
            trusted,
        } => {
            let content = read_input(file.as_deref())?;
            println!("{}", format_blocks(&parser.parse(&content), format, trusted)?);
            Ok(())
        }
        Command::Remote(remote) => run_remote(remote, config, parser).await,
    }
}

async fn run_remote(command: RemoteCommand, config: &Config, parser: ContentParser) -> Result<()> {
    let sessions = SessionManager::new(Arc::new(FileTokenStore::new(&config.token_path)))
        .with_fallback_image(&config.fallback_image);
    let client = ApiClient::new(&config.api_url)?.with_session(&sessions);

    match command {
        RemoteCommand::Posts { page, size } => {
            let posts = client.posts(page, size).await?;
            for post in &posts.items {
                println!("{:>5}  {}", post.id, post.title);
            }
            println!("{}", page_footer(&posts, page));
        }
        RemoteCommand::Post { id, format } => {
            let post = client.post(id).await?;
            if format == Format::Text {
                println!("{}\n", post.title);
            }
            println!("{}", format_blocks(&parser.parse(&post.content), format, false)?);
        }
        RemoteCommand::Portfolio { page, size } => {
            let items = client.portfolio(page, size).await?;
            for item in &items.items {
                if item.technologies.is_empty() {
                    println!("{:>5}  {}", item.id, item.title);
                } else {
                    println!(
                        "{:>5}  {}  [{}]",
                        item.id,
                        item.title,
                        item.technologies.join(", ")
                    );
                }
            }
            println!("{}", page_footer(&items, page));
        }
        RemoteCommand::News {
            category,
            page,
            size,
        } => {
            let query = NewsQuery {
                page,
                page_size: size,
                category,
            };
            let articles = client.news(&query).await?;
            for article in &articles.items {
                println!("{}", article.title);
                println!(
                    "    {} {}",
                    article.source_name(),
                    article.url.as_deref().unwrap_or_default()
                );
            }
        }
        RemoteCommand::Comments { post_id } => {
            let comments = client.comments(post_id).await?;
            if comments.is_empty() {
                println!("No comments yet");
            }
            for comment in &comments {
                let author = comment
                    .author
                    .as_ref()
                    .map(|a| a.display_name())
                    .unwrap_or("Anonymous");
                println!("{author}: {}", comment.content);
            }
        }
        RemoteCommand::Stats => {
            sessions.restore()?;
            print!("{}", format_stats(&client.dashboard_stats().await));
        }
        RemoteCommand::Login { email, password } => {
            let Some(password) = password else {
                bail!("A password is required: pass --password or set BYTEBLOG_PASSWORD");
            };
            let session = sessions.login(&client, &email, &password).await?;
            if let Err(e) = sessions.refresh_profile(&client).await {
                log::warn!("Failed to fetch user profile: {e}");
            }
            let user = sessions.current().map(|s| s.user).unwrap_or(session.user);
            println!("Signed in as {}", describe_user(&user, sessions.is_admin()));
        }
        RemoteCommand::Logout => {
            sessions.logout()?;
            println!("Signed out");
        }
        RemoteCommand::Whoami { refresh } => match sessions.restore()? {
            None => println!("Not signed in"),
            Some(session) => {
                let user = if refresh {
                    sessions
                        .refresh_profile(&client)
                        .await?
                        .unwrap_or(session.user)
                } else {
                    session.user
                };
                println!("{}", describe_user(&user, session.claims.is_admin()));
            }
        },
        RemoteCommand::Read { page, size } => {
            sessions.restore()?;
            let posts = client.posts(page, size).await?.items;
            let handle = tokio::runtime::Handle::current();
            let loader: PostLoader = Box::new(move |id: i64| -> Result<BlogPost> {
                Ok(handle.block_on(client.post(id))?)
            });
            let app = App::new(posts, parser, loader);
            tokio::task::spawn_blocking(move || reader::run(app))
                .await
                .context("Reader task failed")??;
        }
        RemoteCommand::ServeProxy { bind } => {
            sessions.restore()?;
            let bind = bind.unwrap_or_else(|| config.proxy.bind.clone());
            let state = ProxyState::from_config(config).with_session(&sessions);
            byteblog_proxy::serve(&bind, state).await?;
        }
    }

    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read stdin")?;
            Ok(content)
        }
    }
}

fn format_blocks(blocks: &[ContentBlock], format: Format, trusted: bool) -> Result<String> {
    Ok(match format {
        Format::Html if trusted => HtmlRenderer::trusted().render(blocks),
        Format::Html => HtmlRenderer::new().render(blocks),
        Format::Json => serde_json::to_string_pretty(blocks)?,
        Format::Text => TerminalRenderer::new()
            .render(blocks)
            .iter()
            .map(line_text)
            .collect::<Vec<_>>()
            .join("\n")
            .trim_end()
            .to_string(),
    })
}

fn page_footer<T>(page: &Page<T>, requested: u32) -> String {
    let current = page.meta.number.unwrap_or(requested);
    format!(
        "-- page {} of {} --",
        current.saturating_add(1),
        page.total_pages()
    )
}

fn format_stats(stats: &DashboardStats) -> String {
    let rows = [
        ("Posts", stats.total_posts, stats.recent_posts_growth),
        ("Comments", stats.total_comments, stats.recent_comments_growth),
        (
            "Portfolio items",
            stats.total_portfolio_items,
            stats.recent_portfolio_growth,
        ),
        ("Uploads", stats.total_uploads, stats.recent_uploads_growth),
    ];
    rows.iter()
        .map(|(label, total, growth)| format!("{label:<16}{total:>8}  {growth:+.1}%\n"))
        .collect()
}

fn describe_user(user: &User, admin: bool) -> String {
    let mut line = format!("{} <{}>", user.name, user.email);
    if admin {
        line.push_str(" (admin)");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteblog_engine::{PageMeta, parse_content};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const SAMPLE: &str = "# Title\n\nSome <b>bold</b> **text**.";

    #[rstest]
    #[case::escaped(false, "<h1>Title</h1>\n<p>Some &lt;b&gt;bold&lt;/b&gt; <strong>text</strong>.</p>")]
    #[case::trusted(true, "<h1>Title</h1>\n<p>Some <b>bold</b> <strong>text</strong>.</p>")]
    fn html_output(#[case] trusted: bool, #[case] expected: &str) {
        let blocks = parse_content(SAMPLE);
        assert_eq!(format_blocks(&blocks, Format::Html, trusted).unwrap(), expected);
    }

    #[test]
    fn json_output_is_tagged() {
        let blocks = parse_content(SAMPLE);
        let json: serde_json::Value =
            serde_json::from_str(&format_blocks(&blocks, Format::Json, false).unwrap()).unwrap();
        assert_eq!(json[0]["type"], "heading");
        assert_eq!(json[1]["type"], "paragraph");
    }

    #[test]
    fn text_output_has_no_trailing_blank() {
        let blocks = parse_content(SAMPLE);
        assert_eq!(
            format_blocks(&blocks, Format::Text, false).unwrap(),
            "# Title\n\nSome <b>bold</b> text."
        );
    }

    #[test]
    fn footer_prefers_reported_page() {
        let page = Page::<()> {
            items: vec![],
            meta: PageMeta {
                number: Some(2),
                total_pages: Some(5),
                ..PageMeta::default()
            },
        };
        assert_eq!(page_footer(&page, 0), "-- page 3 of 5 --");

        let bare = Page::<()> {
            items: vec![],
            meta: PageMeta::default(),
        };
        assert_eq!(page_footer(&bare, 0), "-- page 1 of 1 --");
    }

    #[test]
    fn stats_table() {
        let stats = DashboardStats {
            total_posts: 12,
            recent_posts_growth: 4.0,
            ..DashboardStats::default()
        };
        assert_eq!(
            format_stats(&stats).lines().next(),
            Some("Posts                 12  +4.0%")
        );
    }

    #[test]
    fn admin_marker() {
        let user = User {
            id: Some(1),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role: Some("ADMIN".to_string()),
            profile_image: None,
        };
        assert_eq!(describe_user(&user, true), "Ada <ada@example.com> (admin)");
        assert_eq!(describe_user(&user, false), "Ada <ada@example.com>");
    }
}
