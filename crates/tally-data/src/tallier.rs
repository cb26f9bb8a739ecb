//! Response counting over a session descriptor.
//!
//! The descriptor layout that matters here:
//!
//! ```text
//! <root>
//!   <questionlist>
//!     <questions>
//!       <multichoice>            (repeated)
//!         <responses>
//!           <response>           (repeated)
//!             <deviceid>1A2B3</deviceid>
//! ```

use std::path::Path;

use roxmltree::{Document, Node};
use tally_core::error::{Result, TallyError};
use tally_core::models::{DeviceId, SessionResult};
use tracing::debug;

const QUESTION_PATH: [&str; 3] = ["questionlist", "questions", "multichoice"];
const RESPONSE_PATH: [&str; 2] = ["responses", "response"];
const DEVICE_ID_TAG: &str = "deviceid";

/// Read the descriptor at `path` and tally its responses.
pub fn tally_session(path: &Path) -> Result<SessionResult> {
    let xml = std::fs::read_to_string(path).map_err(|source| TallyError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    tally_xml(&xml, path)
}

/// Tally descriptor text. `source` is only used in error messages.
pub fn tally_xml(xml: &str, source: &Path) -> Result<SessionResult> {
    let parse_err = |reason: String| TallyError::SessionParse {
        path: source.to_path_buf(),
        reason,
    };

    let doc = Document::parse(xml).map_err(|e| parse_err(format!("invalid XML: {e}")))?;

    let questions = descendants_at(doc.root_element(), &QUESTION_PATH);
    let mut result = SessionResult::new(questions.len());

    for (q_idx, question) in questions.iter().enumerate() {
        for (r_idx, response) in descendants_at(*question, &RESPONSE_PATH).iter().enumerate() {
            let raw = response
                .children()
                .find(|n| n.has_tag_name(DEVICE_ID_TAG))
                .and_then(|n| n.text())
                .ok_or_else(|| {
                    parse_err(format!(
                        "response {} of question {} has no {}",
                        r_idx + 1,
                        q_idx + 1,
                        DEVICE_ID_TAG
                    ))
                })?;

            let id: DeviceId = raw.parse().map_err(|_| {
                parse_err(format!(
                    "response {} of question {} has malformed device id {:?}",
                    r_idx + 1,
                    q_idx + 1,
                    raw
                ))
            })?;
            result.record_response(id);
        }
    }

    debug!(
        "Tallied {} questions, {} responses from {} devices in {}",
        result.total_questions,
        result.total_responses(),
        result.devices().count(),
        source.display()
    );

    Ok(result)
}

/// All elements reached from `start` by following child tags in `path`, in
/// document order.
fn descendants_at<'a, 'input>(start: Node<'a, 'input>, path: &[&str]) -> Vec<Node<'a, 'input>> {
    let mut current = vec![start];
    for tag in path {
        current = current
            .iter()
            .flat_map(|node| node.children().filter(|c| c.has_tag_name(*tag)))
            .collect();
    }
    current
}

// ── Tests ─────────────────────────────────────────────────────────────────────
