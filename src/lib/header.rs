//! @PG (program) record handling for output headers.
//!
//! Every output header gets one `fixbam` program record appended to the existing chain: its PP
//! tag names the last program already present, and its ID gets a numeric suffix when `fixbam`
//! is already taken (for example when the tool is run twice over the same file).

use ahash::AHashSet;
use anyhow::Result;
use bstr::BString;
use noodles::sam::Header;
use noodles::sam::header::record::value::Map;
use noodles::sam::header::record::value::map::Program;
use noodles::sam::header::record::value::map::program::tag;

/// Program name and base @PG ID written by this tool.
pub const PROGRAM_NAME: &str = "fixbam";

/// Returns the ID of the program at the end of the @PG chain.
///
/// That is the program no other program references through its PP tag. `None` if the header
/// has no programs.
#[must_use]
pub fn get_last_program_id(header: &Header) -> Option<String> {
    let programs = header.programs();
    let program_map = programs.as_ref();

    let referenced: AHashSet<&[u8]> = program_map
        .values()
        .filter_map(|pg| pg.other_fields().get(&tag::PREVIOUS_PROGRAM_ID))
        .map(AsRef::as_ref)
        .collect();

    program_map
        .keys()
        .find(|id| !referenced.contains(id.as_slice()))
        .or_else(|| program_map.keys().next())
        .map(|id| String::from_utf8_lossy(id).into_owned())
}

/// Returns `base_id`, or `base_id.N` for the smallest N not already used as a @PG ID.
#[must_use]
pub fn make_unique_program_id(header: &Header, base_id: &str) -> String {
    let programs = header.programs();
    let program_map = programs.as_ref();

    if !program_map.contains_key(base_id.as_bytes()) {
        return base_id.to_string();
    }

    (1..)
        .map(|i| format!("{base_id}.{i}"))
        .find(|candidate| !program_map.contains_key(candidate.as_bytes()))
        .unwrap_or_else(|| format!("{base_id}.{}", std::process::id()))
}

/// Builds the @PG record for this tool.
///
/// # Errors
///
/// Returns an error if the program record cannot be built.
pub fn build_program_record(
    version: &str,
    command_line: &str,
    previous_program: Option<&str>,
) -> Result<Map<Program>> {
    let mut builder = Map::<Program>::builder()
        .insert(tag::NAME, PROGRAM_NAME)
        .insert(tag::VERSION, version)
        .insert(tag::COMMAND_LINE, command_line);

    if let Some(pp) = previous_program {
        builder = builder.insert(tag::PREVIOUS_PROGRAM_ID, pp);
    }

    Ok(builder.build()?)
}

/// Appends a `fixbam` @PG record to `header`, chained to the previous last program.
///
/// # Errors
///
/// Returns an error if the program record cannot be added to the header.
pub fn add_pg_record(mut header: Header, version: &str, command_line: &str) -> Result<Header> {
    let previous_program = get_last_program_id(&header);
    let unique_id = make_unique_program_id(&header, PROGRAM_NAME);
    let pg_record = build_program_record(version, command_line, previous_program.as_deref())?;

    header.programs_mut().add(BString::from(unique_id), pg_record)?;

    Ok(header)
}
