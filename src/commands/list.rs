//! List posts

use anyhow::Result;

use crate::config::SiteConfig;
use crate::content::Post;
use crate::Blog;

/// Print every post, newest first
pub async fn run(blog: &Blog) -> Result<()> {
    let posts = blog.posts.list_posts().await;
    print!("{}", render(&blog.config, &posts, blog.posts.is_using_fallback()));
    Ok(())
}

/// Site header, then one line per post: `date - title [slug] #tag`
pub fn render(config: &SiteConfig, posts: &[Post], demo: bool) -> String {
    let mut out = format!("{} by {}\n", config.title, config.author);
    if !config.description.is_empty() {
        out.push_str(&format!("{}\n", config.description));
    }
    out.push('\n');

    if demo {
        out.push_str("Viewing demo content: object storage credentials are not configured.\n");
    }

    out.push_str(&format!("Posts ({}):\n", posts.len()));
    for post in posts {
        out.push_str(&format!("  {} - {} [{}]", post.date, post.title, post.slug));
        if let Some(tag) = post.primary_tag() {
            out.push_str(&format!(" #{}", tag));
        }
        out.push('\n');
    }

    out
}
