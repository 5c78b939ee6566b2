use xfgrab_scraper::url::Url;
use xfgrab_scraper::{
    normalize, resolve_pages, resolve_root, resolve_threads, sanitize_title, thread_title,
    Document, Target,
};

#[test]
fn normalizes_to_a_single_trailing_slash() {
    assert_eq!(
        normalize("https://forum.example/threads/cats.1"),
        "https://forum.example/threads/cats.1/"
    );
    assert_eq!(
        normalize("https://forum.example/threads/cats.1/"),
        "https://forum.example/threads/cats.1/"
    );
}

#[test]
fn truncates_page_and_post_suffixes_from_thread_urls() {
    let (root, target) =
        resolve_root("https://forum.example/threads/cats.1/page-4#post-9").unwrap();
    assert_eq!(root.as_str(), "https://forum.example/threads/cats.1/");
    assert_eq!(target, Target::Thread);
}

#[test]
fn classifies_category_urls() {
    let (root, target) = resolve_root("https://forum.example/forums/pets.2/post-55").unwrap();
    assert_eq!(root.as_str(), "https://forum.example/forums/pets.2/");
    assert_eq!(target, Target::Category);
}

#[test]
fn category_wins_when_both_markers_are_present() {
    let (root, target) =
        resolve_root("https://forum.example/forums/pets.2/threads/cats.1/").unwrap();
    assert_eq!(root.as_str(), "https://forum.example/forums/pets.2/");
    assert_eq!(target, Target::Category);
}

#[test]
fn rejects_urls_with_neither_marker() {
    assert!(resolve_root("https://forum.example/members/someone.3/").is_err());
    assert!(resolve_root("not a url").is_err());
}

#[test]
fn bare_marker_urls_pass_through_untouched() {
    let (root, target) = resolve_root("https://forum.example/threads/").unwrap();
    assert_eq!(root.as_str(), "https://forum.example/threads/");
    assert_eq!(target, Target::Thread);
}

#[test]
fn pagination_defaults_to_one_page() {
    let doc = Document::parse("<html><body><div>no nav here</div></body></html>");
    let root = Url::parse("https://forum.example/threads/cats.1/").unwrap();
    let pages = resolve_pages(&root, &doc);
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].as_str(), "https://forum.example/threads/cats.1/page-1");
}

#[test]
fn pagination_uses_the_maximum_numeric_label() {
    let doc = Document::parse(
        r#"<ul>
            <li class="pageNav-page">1</li>
            <li class="pageNav-page">2</li>
            <li class="pageNav-page">40</li>
            <li class="pageNav-page">…</li>
        </ul>"#,
    );
    let root = Url::parse("https://forum.example/threads/cats.1/").unwrap();
    let pages = resolve_pages(&root, &doc);
    assert_eq!(pages.len(), 40);
    assert_eq!(pages[0].as_str(), "https://forum.example/threads/cats.1/page-1");
    assert_eq!(pages[39].as_str(), "https://forum.example/threads/cats.1/page-40");
}

#[test]
fn thread_links_are_deduplicated_and_truncated() {
    let doc = Document::parse(
        r#"<div>
            <div class="structItem-title">
                <a href="/threads/cats.1/unread">Cats</a>
                <a href="/threads/cats.1/">Cats again</a>
            </div>
            <div class="structItem-title">
                <a href="/threads/dogs.2/latest">Dogs</a>
                <a href="/members/someone.3/">Not a thread</a>
            </div>
        </div>"#,
    );
    let page = Url::parse("https://forum.example/forums/pets.2/page-1").unwrap();
    let threads: Vec<String> = resolve_threads(&page, &doc)
        .iter()
        .map(|u| u.to_string())
        .collect();
    assert_eq!(
        threads,
        [
            "https://forum.example/threads/cats.1/",
            "https://forum.example/threads/dogs.2/",
        ]
    );
}

#[test]
fn titles_lose_filesystem_unsafe_characters() {
    assert_eq!(
        sanitize_title(r#"Cats: the "best" pets? *yes*"#),
        "Cats_ the _best_ pets_ _yes_"
    );
    assert_eq!(sanitize_title("A/B\\C|D"), "A_B_C_D");
}

#[test]
fn thread_title_comes_from_the_title_element() {
    let doc = Document::parse(
        r#"<div><h1 class="p-title-value">Kittens / Spring 2024</h1></div>"#,
    );
    assert_eq!(thread_title(&doc).unwrap(), "Kittens _ Spring 2024");
}

#[test]
fn missing_title_element_yields_none() {
    let doc = Document::parse("<html><body><p>gone</p></body></html>");
    assert!(thread_title(&doc).is_none());
}
