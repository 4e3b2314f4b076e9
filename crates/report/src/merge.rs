#![forbid(unsafe_code)]

use crate::error::ReportError;
use lopdf::{Document, Object, ObjectId, dictionary};

/// Concatenates the pages of `parts` in order into one document.
///
/// Each input's page tree is kept whole and hung under a new root, so
/// attributes inherited from the original tree nodes survive.
pub fn merge_pdfs(parts: &[&[u8]]) -> Result<Vec<u8>, ReportError> {
    let mut merged = Document::with_version("1.5");
    let mut next_id = 1;
    let mut roots = Vec::with_capacity(parts.len());
    let mut page_count: i64 = 0;

    for (part, bytes) in parts.iter().enumerate() {
        let invalid = |source| ReportError::InvalidInput { part, source };
        let mut doc = Document::load_mem(bytes).map_err(invalid)?;
        doc.renumber_objects_with(next_id);
        next_id = doc.max_id + 1;

        let pages = doc.get_pages().len();
        if pages == 0 {
            return Err(ReportError::EmptyInput { part });
        }
        roots.push(pages_root(&doc).map_err(invalid)?);
        page_count += pages as i64;
        merged.objects.extend(doc.objects);
    }

    merged.max_id = next_id - 1;
    let pages_id = merged.new_object_id();
    for root in &roots {
        merged
            .get_object_mut(*root)
            .and_then(Object::as_dict_mut)
            .map_err(ReportError::encode)?
            .set("Parent", pages_id);
    }
    let kids: Vec<Object> = roots.iter().copied().map(Object::Reference).collect();
    merged.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        }),
    );
    let catalog_id = merged.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    merged.trailer.set("Root", catalog_id);
    merged.compress();

    let mut out = Vec::new();
    merged.save_to(&mut out).map_err(ReportError::encode)?;
    Ok(out)
}

fn pages_root(doc: &Document) -> Result<ObjectId, lopdf::Error> {
    let catalog_id = doc.trailer.get(b"Root")?.as_reference()?;
    doc.get_object(catalog_id)?
        .as_dict()?
        .get(b"Pages")?
        .as_reference()
}
