//! Show a single post

use anyhow::Result;

use crate::Blog;

/// Print one post's header and body, optionally rendered to HTML
pub async fn run(blog: &Blog, slug: &str, html: bool) -> Result<()> {
    let Some(post) = blog.posts.get_post(slug).await else {
        anyhow::bail!("Post not found: {}", slug);
    };

    println!("{}", post.title);
    println!("{}", post.date);
    if let Some(tags) = post.tags.as_ref().filter(|tags| !tags.is_empty()) {
        println!("Tags: {}", tags.join(", "));
    }
    if let Some(cover) = &post.cover_image {
        println!("Cover: {}", cover);
    }
    println!();

    if html {
        let renderer = crate::content::MarkdownRenderer::new();
        print!("{}", renderer.render(&post.content)?);
    } else {
        println!("{}", post.content);
    }

    Ok(())
}
