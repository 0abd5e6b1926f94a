use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::DocSelector;
use crate::store::DataStore;
use crate::viewer::{DocumentView, Viewer};

use super::helpers::resolve_selectors;

pub fn run<S: DataStore>(store: &S, selectors: &[DocSelector]) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for display in resolve_selectors(store, selectors)? {
        let bytes = store.read_content(&display.document)?;
        let viewer = Viewer::from(display.document.doc_type);
        let preview = viewer.preview(&bytes);
        result.viewed.push(DocumentView {
            display,
            viewer,
            preview,
            bytes,
        });
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::error::DocfolioError;
    use crate::test_utils::MemEnv;
    use crate::viewer::{ImageFormat, Preview};

    #[test]
    fn loads_bytes_and_picks_viewer() {
        let mut env = MemEnv::new();
        let picked = env.pick("scan.gif", "image/gif", b"GIF89a\x02\x00\x03\x00");
        add::run(&mut env.store, &env.categories, Some(&picked), "Scan", "Salud").unwrap();

        let result = run(&env.store, &[DocSelector::Index(1)]).unwrap();
        let view = &result.viewed[0];

        assert_eq!(view.viewer, Viewer::Image);
        assert_eq!(view.bytes, b"GIF89a\x02\x00\x03\x00");
        assert_eq!(
            view.preview,
            Preview::Image {
                format: ImageFormat::Gif,
                dimensions: Some((2, 3))
            }
        );
    }

    #[test]
    fn viewing_by_id_works() {
        let mut env = MemEnv::new();
        let doc = env.add_document("Lease", "Personal");

        let result = run(&env.store, &[DocSelector::Id(doc.id.clone())]).unwrap();
        assert_eq!(result.viewed[0].display.document, doc);
        assert_eq!(result.viewed[0].viewer, Viewer::Pdf);
    }

    #[test]
    fn unknown_index_is_not_found() {
        let env = MemEnv::new();
        let result = run(&env.store, &[DocSelector::Index(4)]);
        assert!(matches!(result, Err(DocfolioError::DocumentNotFound(_))));
    }
}
