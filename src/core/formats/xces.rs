//! XCES alignment XML output (C9, overlap engine side).
//!
//! Only what is needed to round-trip an alignment result is implemented;
//! layout beyond that (schema validation, extra corpus-level metadata) is
//! out of scope.

use crate::core::align::Link;

/// Render a sequence of [`Link`]s as an XCES `cesAlign` document.
///
/// `from_doc`/`to_doc` populate the `<linkGrp>` attributes of the same name.
pub fn write(links: &[Link], from_doc: &str, to_doc: &str) -> String {
    write_with_langs(links, from_doc, to_doc, None, None)
}

/// As [`write`], additionally setting `fromDoc.lang`/`toDoc.lang` metadata
/// attributes on `<linkGrp>` when the caller resolved `-S`/`-T` language
/// codes. These are implementer-supplied metadata per spec §4.8, not part
/// of the minimal round-trip shape.
pub fn write_with_langs(
    links: &[Link],
    from_doc: &str,
    to_doc: &str,
    from_lang: Option<&str>,
    to_lang: Option<&str>,
) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<!DOCTYPE cesAlign PUBLIC \"-//CES//DTD XML cesAlign//EN\" \"\">\n");
    out.push_str("<cesAlign version=\"1.0\">\n");
    let from_lang_attr = from_lang
        .map(|l| format!(" fromDoc.lang=\"{}\"", escape(l)))
        .unwrap_or_default();
    let to_lang_attr = to_lang
        .map(|l| format!(" toDoc.lang=\"{}\"", escape(l)))
        .unwrap_or_default();
    out.push_str(&format!(
        "  <linkGrp fromDoc=\"{}\" toDoc=\"{}\"{}{}>\n",
        escape(from_doc),
        escape(to_doc),
        from_lang_attr,
        to_lang_attr,
    ));
    for (index, link) in links.iter().enumerate() {
        let src = link.src_ids.join(" ");
        let trg = link.trg_ids.join(" ");
        let overlap_attr = match link.overlap_ratio {
            Some(ratio) => format!(" overlap=\"{ratio:.3}\""),
            None => String::new(),
        };
        out.push_str(&format!(
            "    <link id=\"SL{}\" xtargets=\"{} ; {}\"{}/>\n",
            index + 1,
            escape(&src),
            escape(&trg),
            overlap_attr
        ));
    }
    out.push_str("  </linkGrp>\n");
    out.push_str("</cesAlign>\n");
    out
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(src: &[&str], trg: &[&str], overlap: Option<f64>) -> Link {
        Link {
            src_ids: src.iter().map(|s| s.to_string()).collect(),
            trg_ids: trg.iter().map(|s| s.to_string()).collect(),
            common_time: None,
            non_common_time: None,
            overlap_ratio: overlap,
        }
    }

    #[test]
    fn test_write_basic_link() {
        let links = vec![link(&["1"], &["1"], Some(1.0))];
        let xml = write(&links, "src.xml", "trg.xml");
        assert!(xml.contains("fromDoc=\"src.xml\""));
        assert!(xml.contains("toDoc=\"trg.xml\""));
        assert!(xml.contains(r#"<link id="SL1" xtargets="1 ; 1" overlap="1.000"/>"#));
    }

    #[test]
    fn test_write_empty_link_omits_overlap() {
        let links = vec![link(&["1"], &[], None)];
        let xml = write(&links, "a", "b");
        assert!(xml.contains(r#"<link id="SL1" xtargets="1 ; "/>"#));
        assert!(!xml.contains("overlap"));
    }

    #[test]
    fn test_write_many_to_many() {
        let links = vec![link(&["1", "2"], &["1"], Some(1.0))];
        let xml = write(&links, "a", "b");
        assert!(xml.contains(r#"xtargets="1 2 ; 1""#));
    }

    #[test]
    fn test_escapes_doc_names() {
        let xml = write(&[], "a&b.xml", "c");
        assert!(xml.contains("fromDoc=\"a&amp;b.xml\""));
    }

    #[test]
    fn test_write_with_langs_sets_attributes() {
        let xml = write_with_langs(&[], "a.xml", "b.xml", Some("eng"), Some("fra"));
        assert!(xml.contains("fromDoc.lang=\"eng\""));
        assert!(xml.contains("toDoc.lang=\"fra\""));
    }

    #[test]
    fn test_write_without_langs_omits_attributes() {
        let xml = write(&[], "a.xml", "b.xml");
        assert!(!xml.contains("lang="));
    }
}
