//! Appium page-source parsing.
//!
//! An XCUITest page source is an XML document shaped like
//! `<AppiumAUT><XCUIElementTypeApplication><XCUIElementTypeWindow>...`.
//! Parsing peels off that fixed envelope and returns the window subtrees
//! as [`Snapshot`] roots. Element text content is ignored; every piece of
//! queryable data in these dumps lives in XML attributes.

use std::path::Path;
use std::time::Instant;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use tracing::{debug, info};

use uisnap_model::{Element, Snapshot};

use crate::error::{IngestError, Result};

/// Document root emitted by the XCUITest driver.
pub const SESSION_ROOT: &str = "AppiumAUT";
/// Application node expected directly under the session root.
pub const APPLICATION_TAG: &str = "XCUIElementTypeApplication";
/// Window nodes whose subtrees become the snapshot roots.
pub const WINDOW_TAG: &str = "XCUIElementTypeWindow";

/// Reads and parses a page-source file.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let load_start = Instant::now();
    let xml = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot = parse_snapshot(&xml)?;
    info!(
        path = %path.display(),
        root_count = snapshot.roots.len(),
        element_count = snapshot.element_count(),
        duration_ms = load_start.elapsed().as_millis(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

/// Parses a page-source document from a string.
///
/// Fails on malformed XML and on any deviation from the
/// `AppiumAUT` / `XCUIElementTypeApplication` / `XCUIElementTypeWindow`
/// envelope. On success the snapshot has at least one root.
pub fn parse_snapshot(xml: &str) -> Result<Snapshot> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                let tag = local_name(start.name());
                if tag != SESSION_ROOT {
                    return Err(IngestError::UnexpectedRoot { found: tag });
                }
                let root = read_element(&mut reader, &start)?;
                let snapshot = extract_windows(root)?;
                drain_trailing(&mut reader)?;
                debug!(
                    root_count = snapshot.roots.len(),
                    element_count = snapshot.element_count(),
                    "page source parsed"
                );
                return Ok(snapshot);
            }
            Ok(Event::Empty(start)) => {
                let tag = local_name(start.name());
                // A childless root can never contain the application node.
                return if tag == SESSION_ROOT {
                    Err(IngestError::MissingApplication)
                } else {
                    Err(IngestError::UnexpectedRoot { found: tag })
                };
            }
            Ok(Event::Eof) => return Err(IngestError::EmptyDocument),
            Ok(Event::Text(text)) if text.iter().all(u8::is_ascii_whitespace) => {}
            // Declaration, DOCTYPE, and comments before the root.
            Ok(Event::Decl(_) | Event::DocType(_) | Event::Comment(_) | Event::PI(_)) => {}
            Ok(_) => {
                return Err(IngestError::LeadingContent {
                    position: reader.buffer_position(),
                });
            }
            Err(error) => return Err(IngestError::xml(reader.buffer_position(), &error)),
        }
    }
}

/// Reads the subtree of an already-opened element, consuming its end tag.
fn read_element<'a>(reader: &mut Reader<&'a [u8]>, start: &BytesStart<'a>) -> Result<Element> {
    let mut element = element_shell(reader, start)?;
    loop {
        match reader.read_event() {
            Ok(Event::Start(child_start)) => {
                let tag = local_name(child_start.name());
                let child = read_element(reader, &child_start)?;
                element.children.entry(tag).or_default().push(child);
            }
            Ok(Event::Empty(child_start)) => {
                let tag = local_name(child_start.name());
                let child = element_shell(reader, &child_start)?;
                element.children.entry(tag).or_default().push(child);
            }
            Ok(Event::End(_)) => return Ok(element),
            Ok(Event::Eof) => {
                return Err(IngestError::UnclosedElement {
                    tag: local_name(start.name()),
                });
            }
            // Text, CDATA, and comments carry no queryable attributes.
            Ok(_) => {}
            Err(error) => return Err(IngestError::xml(reader.buffer_position(), &error)),
        }
    }
}

/// Builds an element from a start tag's attributes, children still unread.
fn element_shell(reader: &Reader<&[u8]>, start: &BytesStart<'_>) -> Result<Element> {
    let mut element = Element::new();
    for attribute in start.attributes() {
        let attribute = match attribute {
            Ok(attribute) => attribute,
            Err(error) => return Err(IngestError::xml(reader.buffer_position(), &error)),
        };
        let key = local_name(attribute.key);
        let value = match attribute.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(error) => return Err(IngestError::xml(reader.buffer_position(), &error)),
        };
        element.attributes.insert(key, value);
    }
    Ok(element)
}

/// Unwraps the fixed envelope and returns the window roots.
fn extract_windows(mut root: Element) -> Result<Snapshot> {
    let mut applications = root.children.remove(APPLICATION_TAG).unwrap_or_default();
    match applications.len() {
        0 => Err(IngestError::MissingApplication),
        1 => {
            let mut application = applications.remove(0);
            let windows = application.children.remove(WINDOW_TAG).unwrap_or_default();
            if windows.is_empty() {
                Err(IngestError::MissingWindow)
            } else {
                Ok(Snapshot { roots: windows })
            }
        }
        count => Err(IngestError::AmbiguousApplication { count }),
    }
}

/// Rejects anything but whitespace, comments, and processing instructions
/// after the document root.
fn drain_trailing(reader: &mut Reader<&[u8]>) -> Result<()> {
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => return Ok(()),
            Ok(Event::Text(text)) if text.iter().all(u8::is_ascii_whitespace) => {}
            Ok(Event::Comment(_) | Event::PI(_)) => {}
            Ok(_) => {
                return Err(IngestError::TrailingContent {
                    position: reader.buffer_position(),
                });
            }
            Err(error) => return Err(IngestError::xml(reader.buffer_position(), &error)),
        }
    }
}

fn local_name(name: QName<'_>) -> String {
    String::from_utf8_lossy(name.local_name().as_ref()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unexpected_document_root() {
        let error = parse_snapshot("<html><body/></html>").unwrap_err();
        assert!(matches!(error, IngestError::UnexpectedRoot { found } if found == "html"));
    }

    #[test]
    fn rejects_root_without_application() {
        let error = parse_snapshot("<AppiumAUT><Other/></AppiumAUT>").unwrap_err();
        assert!(matches!(error, IngestError::MissingApplication));

        let error = parse_snapshot("<AppiumAUT/>").unwrap_err();
        assert!(matches!(error, IngestError::MissingApplication));
    }

    #[test]
    fn rejects_multiple_applications() {
        let xml = "<AppiumAUT>\
            <XCUIElementTypeApplication><XCUIElementTypeWindow/></XCUIElementTypeApplication>\
            <XCUIElementTypeApplication><XCUIElementTypeWindow/></XCUIElementTypeApplication>\
            </AppiumAUT>";
        let error = parse_snapshot(xml).unwrap_err();
        assert!(matches!(
            error,
            IngestError::AmbiguousApplication { count: 2 }
        ));
    }

    #[test]
    fn rejects_application_without_windows() {
        let xml = "<AppiumAUT><XCUIElementTypeApplication name=\"App\"/></AppiumAUT>";
        let error = parse_snapshot(xml).unwrap_err();
        assert!(matches!(error, IngestError::MissingWindow));
    }

    #[test]
    fn rejects_empty_document() {
        assert!(matches!(
            parse_snapshot("").unwrap_err(),
            IngestError::EmptyDocument
        ));
        assert!(matches!(
            parse_snapshot("<?xml version=\"1.0\"?>\n").unwrap_err(),
            IngestError::EmptyDocument
        ));
    }

    #[test]
    fn rejects_content_after_the_root() {
        let xml = "<AppiumAUT>\
            <XCUIElementTypeApplication><XCUIElementTypeWindow/></XCUIElementTypeApplication>\
            </AppiumAUT><AppiumAUT/>";
        let error = parse_snapshot(xml).unwrap_err();
        assert!(matches!(error, IngestError::TrailingContent { .. }));
    }

    #[test]
    fn rejects_content_before_the_root() {
        let xml = "junk before the declaration <AppiumAUT>\
            <XCUIElementTypeApplication><XCUIElementTypeWindow/></XCUIElementTypeApplication>\
            </AppiumAUT>";
        let error = parse_snapshot(xml).unwrap_err();
        assert!(matches!(error, IngestError::LeadingContent { .. }));
    }

    #[test]
    fn allows_whitespace_and_comments_around_the_root() {
        let xml = "<?xml version=\"1.0\"?>\n<!-- captured 2016-05-26 -->\n<AppiumAUT>\
            <XCUIElementTypeApplication><XCUIElementTypeWindow/></XCUIElementTypeApplication>\
            </AppiumAUT>\n<!-- end of capture -->\n";
        let snapshot = parse_snapshot(xml).unwrap();
        assert_eq!(snapshot.roots.len(), 1);
    }

    #[test]
    fn rejects_unclosed_element() {
        // The innermost element that is still open when input ends is named.
        let xml = "<AppiumAUT><XCUIElementTypeApplication><XCUIElementTypeWindow>";
        let error = parse_snapshot(xml).unwrap_err();
        assert!(
            matches!(error, IngestError::UnclosedElement { tag } if tag == "XCUIElementTypeWindow")
        );
    }
}
