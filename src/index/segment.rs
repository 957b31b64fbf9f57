//! On-disk binary format shared by partial segments and the final index: a
//! term dictionary (`*.dict`) mapping each term to an offset/length into a
//! postings file (`*.postings`), so a single term's postings can be read
//! without decoding the whole index. Encoded with `bincode`.

use crate::error::{IndexError, Result};
use crate::index::types::{Accumulator, DocId, Posting, PostingList};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// One term's location within the postings file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TermInfo {
    pub df: u32,
    pub offset: u64,
    pub len: u64,
}

/// The on-disk term dictionary: term -> location. Small enough to hold
/// entirely in memory even for a large index (it's O(|vocabulary|), not
/// O(|postings|)).
pub type TermDict = AHashMap<String, TermInfo>;

/// A flat, doc-id-sorted posting record as written to the postings file.
#[derive(Serialize, Deserialize)]
struct PostingRecord {
    doc_id: DocId,
    tf: u32,
    is_important: bool,
}

/// Write an accumulator out as a `(dict_path, postings_path)` pair, in
/// deterministic term order, with each term's postings sorted by doc-id.
/// Deterministic ordering is what makes merging the same segments twice
/// produce a byte-identical result.
pub fn write_accumulator(acc: &Accumulator, dict_path: &Path, postings_path: &Path) -> Result<()> {
    let mut dict = TermDict::default();
    let mut postings_writer = BufWriter::new(
        File::create(postings_path).map_err(|source| IndexError::Merge { source })?,
    );
    let mut offset: u64 = 0;

    let mut terms: Vec<&String> = acc.keys().collect();
    terms.sort();

    for term in terms {
        let postings = &acc[term];
        let mut records: Vec<PostingRecord> = postings
            .iter()
            .map(|(&doc_id, posting)| PostingRecord {
                doc_id,
                tf: posting.tf,
                is_important: posting.is_important,
            })
            .collect();
        records.sort_unstable_by_key(|r| r.doc_id);

        let encoded = bincode::serialize(&records)?;
        postings_writer.write_all(&encoded)?;

        dict.insert(
            term.clone(),
            TermInfo {
                df: records.len() as u32,
                offset,
                len: encoded.len() as u64,
            },
        );
        offset += encoded.len() as u64;
    }

    postings_writer.flush()?;

    let dict_file = File::create(dict_path)?;
    bincode::serialize_into(BufWriter::new(dict_file), &dict)?;

    Ok(())
}

/// Load a term dictionary from disk.
pub fn load_dict(dict_path: &Path) -> Result<TermDict> {
    let file = File::open(dict_path).map_err(|e| IndexError::MissingIndex {
        path: dict_path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let dict = bincode::deserialize_from(BufReader::new(file))?;
    Ok(dict)
}

/// Read one term's posting list from the postings file without decoding any
/// other term. Used by the on-demand reader tier, where only touched terms
/// are paid for.
pub fn read_posting_list(postings_path: &Path, info: &TermInfo) -> Result<PostingList> {
    let mut file = File::open(postings_path)?;
    file.seek(SeekFrom::Start(info.offset))?;
    let mut buf = vec![0u8; info.len as usize];
    file.read_exact(&mut buf)?;

    let records: Vec<PostingRecord> = bincode::deserialize(&buf)?;
    let mut list = PostingList::default();
    for record in records {
        list.insert(
            record.doc_id,
            Posting {
                tf: record.tf,
                is_important: record.is_important,
            },
        );
    }
    Ok(list)
}

/// Decode the entire postings file into an in-memory accumulator, for the
/// resident reader tier — acceptable when the whole index fits in RAM.
pub fn decode_full(dict: &TermDict, postings_path: &Path) -> Result<Accumulator> {
    let mut acc = Accumulator::default();
    for (term, info) in dict {
        let list = read_posting_list(postings_path, info)?;
        acc.insert(term.clone(), list);
    }
    Ok(acc)
}

/// Total on-disk size in bytes of a dict/postings pair, reported in the
/// build summary statistics.
pub fn artifact_size_bytes(dict_path: &Path, postings_path: &Path) -> std::io::Result<u64> {
    let dict_size = std::fs::metadata(dict_path)?.len();
    let postings_size = std::fs::metadata(postings_path)?.len();
    Ok(dict_size + postings_size)
}
