//! Built-in sample posts served when the bucket is unconfigured or unusable

use lazy_static::lazy_static;

use super::Post;

const PLACEHOLDER_COVER: &str = "/placeholder.svg?height=400&width=600";

lazy_static! {
    static ref SAMPLE_POSTS: Vec<Post> = vec![
        sample(
            "getting-started-with-nextjs",
            "Getting Started with Next.js",
            "2023-04-15",
            "Learn how to build modern web applications with Next.js, the React framework for production.",
            include_str!("samples/getting-started-with-nextjs.md"),
            &["nextjs", "react", "web-development"],
            None,
        ),
        sample(
            "working-with-aws-s3",
            "Working with AWS S3 in Node.js",
            "2023-04-10",
            "Learn how to use AWS S3 with Node.js to store and retrieve files in the cloud.",
            include_str!("samples/working-with-aws-s3.md"),
            &["aws", "s3", "nodejs"],
            Some(PLACEHOLDER_COVER),
        ),
        sample(
            "markdown-blog-with-nextjs",
            "Building a Markdown Blog with Next.js",
            "2023-04-19",
            "Create a static blog using Next.js and Markdown files stored in AWS S3.",
            include_str!("samples/markdown-blog-with-nextjs.md"),
            &["nextjs", "markdown", "blog"],
            None,
        ),
        sample(
            "tailwind-css-tips-and-tricks",
            "Tailwind CSS Tips and Tricks",
            "2023-04-05",
            "Learn some useful tips and tricks for working with Tailwind CSS in your projects.",
            include_str!("samples/tailwind-css-tips-and-tricks.md"),
            &["css", "tailwind", "web-design"],
            Some(PLACEHOLDER_COVER),
        ),
    ];
}

fn sample(
    slug: &str,
    title: &str,
    date: &str,
    excerpt: &str,
    content: &str,
    tags: &[&str],
    cover_image: Option<&str>,
) -> Post {
    Post {
        slug: slug.to_string(),
        title: title.to_string(),
        date: date.to_string(),
        excerpt: excerpt.to_string(),
        content: content.to_string(),
        tags: Some(tags.iter().map(|t| t.to_string()).collect()),
        cover_image: cover_image.map(str::to_string),
    }
}

/// All sample posts, in their fixed order
pub fn posts() -> &'static [Post] {
    &SAMPLE_POSTS
}

/// Sample post with the given slug
pub fn find(slug: &str) -> Option<Post> {
    SAMPLE_POSTS.iter().find(|p| p.slug == slug).cloned()
}
