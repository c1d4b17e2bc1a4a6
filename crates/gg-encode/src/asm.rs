//! DOS assembly listing generator.
//!
//! Reads spreadsheet text (comma-separated cells, one row per line) and
//! writes a small-model x86 program that prints every cell with INT 21h
//! function 02h and ends each row with the `crlf` string (function 09h).

use std::fmt::Write as _;

use gg_core::dos::{DosByteMap, DosMode};
use gg_core::error::CoreError;

const PREAMBLE: &str = "\
;----------------------------------------
; ASCII Art in x86 Assembly for DOSBox
; Generated by glyphgrid
;----------------------------------------

.MODEL SMALL
.STACK 100h

.DATA
    crlf DB 13, 10, \"$\"  ; Carriage return + line feed

.CODE
MAIN PROC
    MOV AX, @DATA
    MOV DS, AX

    CALL DISPLAY_ART

    MOV AX, 4C00h
    INT 21h
MAIN ENDP

DISPLAY_ART PROC
";

const POSTAMBLE: &str = "\
    RET
DISPLAY_ART ENDP

END MAIN
";

const NEWLINE_GROUP: &str = "\
    MOV DX, OFFSET crlf
    MOV AH, 09h
    INT 21h
";

/// Split spreadsheet text into rows of raw cells.
///
/// Lines that are blank after trimming are dropped; cells are not trimmed
/// here.
///
/// # Example
/// ```
/// use gg_encode::asm::split_rows;
/// let rows = split_rows("a,b\n\n ,c\r\n");
/// assert_eq!(rows, vec![vec!["a", "b"], vec![" ", "c\r"]]);
/// ```
#[must_use]
pub fn split_rows(text: &str) -> Vec<Vec<&str>> {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split(',').collect())
        .collect()
}

/// Translate spreadsheet text into one byte per cell.
///
/// # Errors
/// `CoreError::NoInputData` if the text holds no non-blank line.
///
/// # Example
/// ```
/// use gg_core::dos::{DosByteMap, DosMode};
/// use gg_encode::asm::translate;
/// let map = DosByteMap::new(DosMode::Auto, false);
/// assert_eq!(translate("█,,X\n", &map).unwrap(), vec![vec![32, 219, 88]]);
/// ```
pub fn translate(text: &str, map: &DosByteMap) -> Result<Vec<Vec<u8>>, CoreError> {
    let rows = split_rows(text);
    if rows.is_empty() {
        return Err(CoreError::NoInputData);
    }
    Ok(rows
        .iter()
        .map(|row| row.iter().map(|cell| map.byte_for_cell(cell.trim())).collect())
        .collect())
}

/// Wrap per-row byte sequences in the fixed program scaffolding.
#[must_use]
pub fn emit_program(rows: &[Vec<u8>]) -> String {
    let cells: usize = rows.iter().map(Vec::len).sum();
    let mut out = String::with_capacity(
        PREAMBLE.len() + POSTAMBLE.len() + cells * 40 + rows.len() * NEWLINE_GROUP.len(),
    );
    out.push_str(PREAMBLE);
    for row in rows {
        for byte in row {
            let _ = write!(out, "    MOV DL, {byte}\n    MOV AH, 02h\n    INT 21h\n");
        }
        out.push_str(NEWLINE_GROUP);
    }
    out.push_str(POSTAMBLE);
    out
}

/// Assembly emitter: spreadsheet text → DOS program source.
///
/// `invert` only affects [`DosMode::Custom`].
///
/// # Errors
/// `CoreError::NoInputData` for empty or blank input; nothing is emitted.
///
/// # Example
/// ```
/// use gg_core::dos::DosMode;
/// use gg_encode::asm::encode_asm;
/// let program = encode_asm("█,▒\n", DosMode::Auto, true).unwrap();
/// assert!(program.contains("    MOV DL, 32\n"));
/// assert!(program.contains("    MOV DL, 177\n"));
/// assert!(encode_asm("", DosMode::Auto, true).is_err());
/// ```
pub fn encode_asm(text: &str, mode: DosMode, invert: bool) -> Result<String, CoreError> {
    let map = DosByteMap::new(mode, invert);
    let rows = translate(text, &map)?;
    log::debug!("Assembleur : {} lignes, mode={mode} invert={invert}", rows.len());
    Ok(emit_program(&rows))
}
