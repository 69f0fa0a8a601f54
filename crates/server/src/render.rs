//! HTML fragments returned to the panel's file manager page.

use chrono::{DateTime, Utc};
use humansize::{BINARY, format_size};
use maud::{Markup, html};
use node_files_core::{DirectoryListing, EditableExtensions, RemoteEntry};

pub const ARCHIVE_EXTENSIONS: [&str; 4] = ["zip", "tar.gz", "tar", "gz"];

/// Everything the directory fragment shows.
pub struct DirectoryView<'a> {
    pub listing: &'a DirectoryListing,
    pub editable_extensions: &'a EditableExtensions,
    pub archive_extensions: &'a [&'a str],
}

impl<'a> DirectoryView<'a> {
    pub fn new(listing: &'a DirectoryListing, editable_extensions: &'a EditableExtensions) -> Self {
        Self {
            listing,
            editable_extensions,
            archive_extensions: &ARCHIVE_EXTENSIONS,
        }
    }

    pub fn is_editable(&self, entry: &RemoteEntry) -> bool {
        entry
            .extension()
            .is_some_and(|ext| self.editable_extensions.contains(ext))
    }

    pub fn is_archive(&self, entry: &RemoteEntry) -> bool {
        let name = entry.name.to_ascii_lowercase();
        self.archive_extensions
            .iter()
            .any(|ext| name.ends_with(&format!(".{ext}")))
    }

    /// Path of an entry relative to the server root.
    fn entry_path(&self, entry: &RemoteEntry) -> String {
        format!(
            "{}{}",
            self.listing.header.as_deref().unwrap_or_default(),
            entry.name
        )
    }
}

pub trait FragmentRenderer: Send + Sync {
    fn saved(&self) -> String;

    fn directory(&self, view: &DirectoryView<'_>) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl FragmentRenderer for HtmlRenderer {
    fn saved(&self) -> String {
        html! {
            div class="alert alert-success" { "File has been successfully saved." }
        }
        .into_string()
    }

    fn directory(&self, view: &DirectoryView<'_>) -> String {
        directory_fragment(view).into_string()
    }
}

fn directory_fragment(view: &DirectoryView<'_>) -> Markup {
    let listing = view.listing;
    html! {
        @if let Some(header) = &listing.header {
            h4 class="current-directory" { "/home/container/" (header) }
        }
        table class="table table-hover file-listing" {
            thead {
                tr {
                    th { "Name" }
                    th { "Size" }
                    th { "Last Modified" }
                    th {}
                }
            }
            tbody {
                @if listing.parent.first {
                    tr class="directory-up" {
                        td colspan="4" {
                            a href="#" data-action="open-directory" data-dir="" { "← /home/container/" }
                        }
                    }
                }
                @if let Some(link) = &listing.parent.link {
                    tr class="directory-up" {
                        td colspan="4" {
                            a href="#" data-action="open-directory" data-dir=(link) { "← /home/container/" (link) }
                        }
                    }
                }
                @for folder in &listing.contents.folders {
                    @let path = view.entry_path(folder);
                    tr class="folder" data-path=(path) {
                        td {
                            a href="#" data-action="open-directory" data-dir=(path) { (folder.name) "/" }
                        }
                        td {}
                        td { (modified(folder.modified)) }
                        td {
                            a href="#" data-action="delete" data-path=(path) { "Delete" }
                        }
                    }
                }
                @for file in &listing.contents.files {
                    @let path = view.entry_path(file);
                    tr class="file" data-path=(path) {
                        td {
                            @if view.is_editable(file) {
                                @let edit_url = format!("/node/files/edit/{}", urlencoding::encode(&path));
                                a href=(edit_url) { (file.name) }
                            } @else {
                                (file.name)
                            }
                        }
                        td { (file.size.map(|size| format_size(size, BINARY)).unwrap_or_default()) }
                        td { (modified(file.modified)) }
                        td {
                            @if view.is_archive(file) {
                                a href="#" data-action="decompress" data-path=(path) { "Decompress" }
                                " "
                            }
                            a href="#" data-action="delete" data-path=(path) { "Delete" }
                        }
                    }
                }
                @if listing.contents.files.is_empty() && listing.contents.folders.is_empty() {
                    tr class="empty" {
                        td colspan="4" { "This directory is empty." }
                    }
                }
            }
        }
    }
}

fn modified(at: Option<DateTime<Utc>>) -> String {
    at.map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}
