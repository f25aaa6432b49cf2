use entity::prelude::*;
use util::{estimate_read_time, excerpt_from};

/// Metadata parsed out of a markdown file's leading `---` block, with
/// defaults already resolved against the body. Only the title is left open;
/// it falls back to the slug, which the parser does not know.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct Frontmatter {
    pub title: Option<String>,
    pub excerpt: String,
    pub read_time: String,
    pub category: String,
    pub tags: Vec<String>,
    pub status: PostStatus,
    pub body: String,
}

impl Frontmatter {
    pub fn into_new_post(self, slug: &str) -> NewPost {
        NewPost {
            title: self
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| slug.to_string()),
            slug: slug.to_string(),
            content: self.body,
            excerpt: self.excerpt,
            read_time: self.read_time,
            category: self.category,
            tags: self.tags,
            status: self.status,
        }
    }
}

/// Parses a markdown file. The header is a `---`-delimited block of
/// `key: value` lines; unknown keys are ignored, a missing or unclosed
/// header means the whole file is the body.
pub fn parse(content: &str) -> Frontmatter {
    let (header, body) = split_header(content);

    let mut title = None;
    let mut excerpt = None;
    let mut read_time = None;
    let mut category = None;
    let mut tags = Vec::new();
    let mut status = PostStatus::Published;

    for line in header.unwrap_or_default().lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "title" => title = Some(value.to_string()),
            "excerpt" => excerpt = Some(value.to_string()),
            "readTime" => read_time = Some(value.to_string()),
            "category" => category = Some(value.to_string()),
            "tags" => {
                tags = value
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "status" => {
                status =
                    PostStatus::from_str(value).unwrap_or(PostStatus::Published);
            }
            _ => {}
        }
    }

    Frontmatter {
        title,
        excerpt: excerpt
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| excerpt_from(body)),
        read_time: read_time
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| estimate_read_time(body)),
        category: category
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "general".to_string()),
        tags,
        status,
        body: body.to_string(),
    }
}

/// Writes a post back into the mirrored file format `parse` reads.
pub fn render(post: &PostEntity) -> String {
    format!(
        "---\ntitle: {}\nexcerpt: {}\nreadTime: {}\ncategory: {}\ntags: {}\nstatus: {}\n---\n\n{}\n",
        post.title,
        post.excerpt,
        post.read_time,
        post.category,
        post.tags.join(", "),
        post.status.as_str(),
        post.content.trim_end(),
    )
}

fn split_header(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = content.strip_prefix("---") else {
        return (None, content);
    };
    let Some(end) = rest.find("\n---") else {
        // unclosed header, treat the whole file as body
        return (None, content);
    };

    let header = &rest[..end];
    let body = rest[end + 4..].trim_start_matches(['\r', '\n']);

    (Some(header), body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_keys() {
        let content = "---\ntitle: First Post\nexcerpt: A beginning\nreadTime: 3 min read\ncategory: tech\ntags: rust, web\nstatus: draft\n---\n\nHello.\n";
        let fm = parse(content);

        assert_eq!(fm.title.as_deref(), Some("First Post"));
        assert_eq!(fm.excerpt, "A beginning");
        assert_eq!(fm.read_time, "3 min read");
        assert_eq!(fm.category, "tech");
        assert_eq!(fm.tags, vec!["rust".to_string(), "web".to_string()]);
        assert_eq!(fm.status, PostStatus::Draft);
        assert_eq!(fm.body, "Hello.\n");
    }

    #[test]
    fn ignores_unknown_keys() {
        let content = "---\ntitle: T\nauthor: somebody\nlayout: wide\n---\nBody";
        let fm = parse(content);

        assert_eq!(fm.title.as_deref(), Some("T"));
        assert_eq!(fm.body, "Body");
    }

    #[test]
    fn no_header_means_everything_is_body() {
        let fm = parse("Just some text.\nMore text.");

        assert_eq!(fm.title, None);
        assert_eq!(fm.body, "Just some text.\nMore text.");
        assert_eq!(fm.status, PostStatus::Published);
        assert_eq!(fm.excerpt, "Just some text.");
    }

    #[test]
    fn unclosed_header_is_treated_as_body() {
        let content = "---\ntitle: Broken";
        let fm = parse(content);

        assert_eq!(fm.title, None);
        assert_eq!(fm.body, content);
    }

    #[test]
    fn excerpt_falls_back_to_first_body_line() {
        let content = "---\ntitle: T\n---\n\n\nFirst real line.\nSecond.";
        let fm = parse(content);

        assert_eq!(fm.excerpt, "First real line.");
    }

    #[test]
    fn long_excerpt_fallback_is_truncated() {
        let line = "x".repeat(200);
        let fm = parse(&format!("---\ntitle: T\n---\n{}", line));

        assert_eq!(fm.excerpt.chars().count(), 153);
        assert!(fm.excerpt.ends_with("..."));
    }

    #[test]
    fn unknown_status_defaults_to_published() {
        let fm = parse("---\nstatus: archived\n---\nBody");

        assert_eq!(fm.status, PostStatus::Published);
    }

    #[test]
    fn values_may_contain_colons() {
        let fm = parse("---\ntitle: Rust: The Good Parts\n---\nBody");

        assert_eq!(fm.title.as_deref(), Some("Rust: The Good Parts"));
    }

    #[test]
    fn into_new_post_falls_back_to_slug_title() {
        let post = parse("No header here.").into_new_post("my-first-post");

        assert_eq!(post.title, "my-first-post");
        assert_eq!(post.slug, "my-first-post");
        assert_eq!(post.content, "No header here.");
    }

    #[test]
    fn rendered_posts_parse_back() {
        let post = PostEntity {
            title: "A Post".to_string(),
            slug: "a-post".to_string(),
            content: "The body.".to_string(),
            excerpt: "The body.".to_string(),
            read_time: "1 min read".to_string(),
            category: "notes".to_string(),
            tags: vec!["a".to_string(), "b".to_string()],
            status: PostStatus::Draft,
            ..Default::default()
        };

        let fm = parse(&render(&post));
        assert_eq!(fm.title.as_deref(), Some("A Post"));
        assert_eq!(fm.tags, post.tags);
        assert_eq!(fm.status, PostStatus::Draft);
        assert_eq!(fm.body, "The body.\n");
    }
}
