// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Read-only access to spectral (PHA/PHA2) fits files.
//!
//! Extensions are addressed by name, matched case-insensitively by cfitsio.
//! "primary" always refers to the first HDU, whether or not it has an
//! EXTNAME. Columns are also matched case-insensitively, so "counts" finds
//! "COUNTS".

mod error;

pub use error::FitsError;

use std::{
    ffi::{CStr, CString},
    fmt::Display,
    os::raw::{c_char, c_int, c_long},
    panic::Location,
    path::{Path, PathBuf},
};

use fitsio::{
    hdu::{FitsHdu, HduInfo},
    FitsFile,
};
use log::{debug, trace};

use crate::constants::PRIMARY_EXTENSION;

// cfitsio status codes.
const END_OF_FILE: i32 = 107;
const KEY_NO_EXIST: i32 = 202;
const VALUE_UNDEFINED: i32 = 204;
const COL_NOT_FOUND: i32 = 219;
const BAD_HDU_NUM: i32 = 301;

/// Enough room for any keyword, value or comment on a single header card.
const FLEN_CARD: usize = 81;

/// An opened spectral fits file. The underlying cfitsio handle is closed when
/// this is dropped.
pub struct SpectralFile {
    fptr: FitsFile,
    path: PathBuf,
}

/// A high-level description of one HDU.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionInfo {
    /// The zero-indexed HDU number.
    pub index: usize,
    /// The EXTNAME of the HDU, or "PRIMARY" for HDU 0 if it has none.
    pub name: Option<String>,
    pub kind: ExtensionKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExtensionKind {
    Image { shape: Vec<usize> },
    Table { num_rows: usize, columns: Vec<String> },
    Other,
}

/// A single card of a fits header.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCard {
    pub keyword: String,
    pub value: HeaderValue,
    pub comment: String,
}

/// The value of a header card, interpreted according to the fits standard's
/// fixed-format rules.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderValue {
    Integer(i64),
    Float(f64),
    Logical(bool),
    String(String),
    /// Something we don't interpret, e.g. a complex number.
    Other(String),
    /// The card has no value (e.g. COMMENT, HISTORY).
    Undefined,
}

impl HeaderValue {
    /// Interpret a raw value string as it appears on a header card, e.g.
    /// `'PHA2    '`, `T`, `42` or `1.5D+08`.
    pub fn parse(raw: &str) -> HeaderValue {
        let raw = raw.trim();
        if raw.is_empty() {
            return HeaderValue::Undefined;
        }
        if let Some(s) = raw.strip_prefix('\'') {
            let s = s.strip_suffix('\'').unwrap_or(s);
            // Embedded quotes are doubled, and trailing spaces are not
            // significant.
            return HeaderValue::String(s.replace("''", "'").trim_end().to_string());
        }
        match raw {
            "T" => return HeaderValue::Logical(true),
            "F" => return HeaderValue::Logical(false),
            _ => (),
        }
        if let Ok(i) = raw.parse() {
            return HeaderValue::Integer(i);
        }
        match parse_fits_float(raw) {
            Some(f) => HeaderValue::Float(f),
            None => HeaderValue::Other(raw.to_string()),
        }
    }

    /// Get this value as a number, if it is one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            HeaderValue::Integer(i) => Some(*i as f64),
            HeaderValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            HeaderValue::Integer(_) => "integer",
            HeaderValue::Float(_) => "float",
            HeaderValue::Logical(_) => "logical",
            HeaderValue::String(_) => "string",
            HeaderValue::Other(_) => "unknown",
            HeaderValue::Undefined => "undefined",
        }
    }
}

impl Display for HeaderValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeaderValue::Integer(i) => write!(f, "{i}"),
            HeaderValue::Float(v) => write!(f, "{v}"),
            HeaderValue::Logical(true) => write!(f, "T"),
            HeaderValue::Logical(false) => write!(f, "F"),
            HeaderValue::String(s) => write!(f, "'{s}'"),
            HeaderValue::Other(s) => write!(f, "{s}"),
            HeaderValue::Undefined => Ok(()),
        }
    }
}

/// Fits floats may use a 'D' exponent, which Rust doesn't understand. Words
/// like "inf" and "nan" are not valid fixed-format numbers, so they're
/// rejected here.
fn parse_fits_float(s: &str) -> Option<f64> {
    if s.is_empty()
        || !s.bytes().all(|b| {
            b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'E' | b'e' | b'D' | b'd')
        })
    {
        return None;
    }
    s.replace(['D', 'd'], "E").parse().ok()
}

/// The numeric data of a single table column. Every row has `repeat`
/// elements; `data` is row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// The name of the column as written in the file.
    pub name: String,
    pub num_rows: usize,
    pub repeat: usize,
    pub data: Vec<f64>,
}

impl SpectralFile {
    /// Open a fits file read-only.
    #[track_caller]
    pub fn open<P: AsRef<Path>>(file: P) -> Result<SpectralFile, FitsError> {
        let caller = Location::caller();
        let path = file.as_ref().to_path_buf();
        debug!("Opening {}", path.display());
        let fptr = FitsFile::open(&path).map_err(|e| FitsError::Open {
            fits_error: Box::new(e),
            fits_filename: path.clone().into_boxed_path(),
            source_file: caller.file(),
            source_line: caller.line(),
            source_column: caller.column(),
        })?;
        Ok(SpectralFile { fptr, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Describe every HDU in the file.
    #[track_caller]
    pub fn extensions(&mut self) -> Result<Vec<ExtensionInfo>, FitsError> {
        let caller = Location::caller();
        let num_hdus = unsafe {
            let mut status = 0;
            let mut num_hdus = 0;
            // ffthdu = fits_get_num_hdus
            fitsio_sys::ffthdu(self.fptr.as_raw(), &mut num_hdus, &mut status);
            self.check_status(status, "<all>", caller)?;
            num_hdus as usize
        };
        trace!("{} has {num_hdus} HDUs", self.path.display());

        let mut extensions = Vec::with_capacity(num_hdus);
        for index in 0..num_hdus {
            let hdu = self.fptr.hdu(index).map_err(|e| FitsError::Fitsio {
                fits_error: Box::new(e),
                fits_filename: self.path.clone().into_boxed_path(),
                extension: index.to_string().into_boxed_str(),
                source_file: caller.file(),
                source_line: caller.line(),
                source_column: caller.column(),
            })?;
            let name = match self.read_current_key("EXTNAME", &index.to_string(), caller)? {
                Some(HeaderValue::String(s)) => Some(s),
                _ if index == 0 => Some("PRIMARY".to_string()),
                _ => None,
            };
            let kind = match hdu.info {
                HduInfo::ImageInfo { shape, .. } => ExtensionKind::Image { shape },
                HduInfo::TableInfo {
                    column_descriptions,
                    num_rows,
                } => ExtensionKind::Table {
                    num_rows,
                    columns: column_descriptions.into_iter().map(|c| c.name).collect(),
                },
                _ => ExtensionKind::Other,
            };
            extensions.push(ExtensionInfo { index, name, kind });
        }

        Ok(extensions)
    }

    /// Read every card of an extension's header, in order.
    #[track_caller]
    pub fn header(&mut self, extension: &str) -> Result<Vec<HeaderCard>, FitsError> {
        let caller = Location::caller();
        self.open_hdu(extension, caller)?;

        let mut cards = vec![];
        unsafe {
            let mut status = 0;
            let mut num_keys = 0;
            let mut num_more = 0;
            // ffghsp = fits_get_hdrspace
            fitsio_sys::ffghsp(
                self.fptr.as_raw(),
                &mut num_keys,
                &mut num_more,
                &mut status,
            );
            self.check_status(status, extension, caller)?;

            let mut keyword = [0 as c_char; FLEN_CARD];
            let mut value = [0 as c_char; FLEN_CARD];
            let mut comment = [0 as c_char; FLEN_CARD];
            for i_key in 1..=num_keys {
                // ffgkyn = fits_read_keyn
                fitsio_sys::ffgkyn(
                    self.fptr.as_raw(),
                    i_key,
                    keyword.as_mut_ptr(),
                    value.as_mut_ptr(),
                    comment.as_mut_ptr(),
                    &mut status,
                );
                self.check_status(status, extension, caller)?;
                cards.push(HeaderCard {
                    keyword: CStr::from_ptr(keyword.as_ptr())
                        .to_string_lossy()
                        .into_owned(),
                    value: HeaderValue::parse(&CStr::from_ptr(value.as_ptr()).to_string_lossy()),
                    comment: CStr::from_ptr(comment.as_ptr())
                        .to_string_lossy()
                        .into_owned(),
                });
            }
        }

        Ok(cards)
    }

    /// Read a header key that may or may not exist.
    #[track_caller]
    pub fn read_optional_key(
        &mut self,
        extension: &str,
        key: &str,
    ) -> Result<Option<HeaderValue>, FitsError> {
        let caller = Location::caller();
        self.open_hdu(extension, caller)?;
        self.read_current_key(key, extension, caller)
    }

    /// Read a header key that must exist and must be numeric.
    #[track_caller]
    pub fn read_numeric_key(&mut self, extension: &str, key: &str) -> Result<f64, FitsError> {
        let caller = Location::caller();
        self.open_hdu(extension, caller)?;
        match self.read_current_key(key, extension, caller)? {
            None => Err(FitsError::MissingHeaderKey {
                key: key.into(),
                extension: extension.into(),
                fits_filename: self.path.clone().into_boxed_path(),
                source_file: caller.file(),
                source_line: caller.line(),
                source_column: caller.column(),
            }),
            Some(value) => value.as_f64().ok_or_else(|| FitsError::TypeMismatch {
                name: key.into(),
                found: format!("{} value {value}", value.type_name()).into_boxed_str(),
                extension: extension.into(),
                fits_filename: self.path.clone().into_boxed_path(),
                source_file: caller.file(),
                source_line: caller.line(),
                source_column: caller.column(),
            }),
        }
    }

    /// Read a numeric column of a binary table. Integer columns are converted
    /// to double precision by cfitsio; undefined (null) elements become NaN.
    #[track_caller]
    pub fn read_column(&mut self, extension: &str, column: &str) -> Result<Column, FitsError> {
        let caller = Location::caller();
        let hdu = self.open_hdu(extension, caller)?;
        let (num_rows, column_names) = match hdu.info {
            HduInfo::TableInfo {
                num_rows,
                column_descriptions,
            } => (
                num_rows,
                column_descriptions
                    .into_iter()
                    .map(|c| c.name)
                    .collect::<Vec<_>>(),
            ),
            _ => {
                return Err(FitsError::NotTable {
                    extension: extension.into(),
                    fits_filename: self.path.clone().into_boxed_path(),
                    source_file: caller.file(),
                    source_line: caller.line(),
                    source_column: caller.column(),
                })
            }
        };

        let missing_column = || FitsError::MissingColumn {
            column: column.into(),
            extension: extension.into(),
            fits_filename: self.path.clone().into_boxed_path(),
            source_file: caller.file(),
            source_line: caller.line(),
            source_column: caller.column(),
        };
        // An interior NUL can't be in a column name.
        let column_ffi = CString::new(column).map_err(|_| missing_column())?;

        let col_num = unsafe {
            let mut status = 0;
            let mut col_num = 0;
            // ffgcno = fits_get_colnum; casesen = 0 is CASEINSEN
            fitsio_sys::ffgcno(
                self.fptr.as_raw(),
                0,
                column_ffi.as_ptr() as *mut c_char,
                &mut col_num,
                &mut status,
            );
            if status == COL_NOT_FOUND {
                return Err(missing_column());
            }
            self.check_status(status, extension, caller)?;
            col_num
        };
        let name = column_names
            .get(col_num as usize - 1)
            .cloned()
            .unwrap_or_else(|| column.to_string());

        let (type_code, repeat) = unsafe {
            let mut status = 0;
            let mut type_code: c_int = 0;
            let mut repeat: c_long = 0;
            let mut width: c_long = 0;
            // ffgtcl = fits_get_coltype
            fitsio_sys::ffgtcl(
                self.fptr.as_raw(),
                col_num,
                &mut type_code,
                &mut repeat,
                &mut width,
                &mut status,
            );
            self.check_status(status, extension, caller)?;
            (type_code, repeat as usize)
        };
        let non_numeric = match type_code {
            t if t < 0 => Some("variable-length array"),
            t if t == fitsio_sys::TSTRING as c_int => Some("string column"),
            t if t == fitsio_sys::TLOGICAL as c_int => Some("logical column"),
            t if t == fitsio_sys::TBIT as c_int => Some("bit column"),
            t if t == fitsio_sys::TCOMPLEX as c_int || t == fitsio_sys::TDBLCOMPLEX as c_int => {
                Some("complex column")
            }
            _ => None,
        };
        if let Some(found) = non_numeric {
            return Err(FitsError::TypeMismatch {
                name: name.into_boxed_str(),
                found: found.into(),
                extension: extension.into(),
                fits_filename: self.path.clone().into_boxed_path(),
                source_file: caller.file(),
                source_line: caller.line(),
                source_column: caller.column(),
            });
        }

        let num_elements = num_rows * repeat;
        trace!(
            "Reading {num_rows} rows x {repeat} elements of column '{name}' from extension '{extension}'"
        );
        let mut data = vec![0.0; num_elements];
        if num_elements > 0 {
            unsafe {
                let mut status = 0;
                let mut any_null = 0;
                // ffgcvd = fits_read_col_dbl
                fitsio_sys::ffgcvd(
                    self.fptr.as_raw(),
                    col_num,
                    1,
                    1,
                    num_elements as _,
                    f64::NAN,
                    data.as_mut_ptr(),
                    &mut any_null,
                    &mut status,
                );
                self.check_status(status, extension, caller)?;
                if any_null != 0 {
                    debug!("Column '{name}' of extension '{extension}' contains null values");
                }
            }
        }

        Ok(Column {
            name,
            num_rows,
            repeat,
            data,
        })
    }

    /// Move to the requested extension, making it the current HDU.
    fn open_hdu(
        &mut self,
        extension: &str,
        caller: &'static Location<'static>,
    ) -> Result<FitsHdu, FitsError> {
        let result = if extension.eq_ignore_ascii_case(PRIMARY_EXTENSION) {
            self.fptr.hdu(0)
        } else {
            self.fptr.hdu(extension)
        };
        result.map_err(|e| match &e {
            fitsio::errors::Error::Fits(fe) if matches!(fe.status, BAD_HDU_NUM | END_OF_FILE) => {
                FitsError::MissingExtension {
                    extension: extension.into(),
                    fits_filename: self.path.clone().into_boxed_path(),
                    source_file: caller.file(),
                    source_line: caller.line(),
                    source_column: caller.column(),
                }
            }
            _ => FitsError::Fitsio {
                fits_error: Box::new(e),
                fits_filename: self.path.clone().into_boxed_path(),
                extension: extension.into(),
                source_file: caller.file(),
                source_line: caller.line(),
                source_column: caller.column(),
            },
        })
    }

    /// Read a key from the current HDU. `extension` is only used for error
    /// messages.
    fn read_current_key(
        &mut self,
        key: &str,
        extension: &str,
        caller: &'static Location<'static>,
    ) -> Result<Option<HeaderValue>, FitsError> {
        // An interior NUL can't be in a keyword.
        let key_ffi = match CString::new(key) {
            Ok(k) => k,
            Err(_) => return Ok(None),
        };
        let mut value = [0 as c_char; FLEN_CARD];
        let mut comment = [0 as c_char; FLEN_CARD];
        unsafe {
            let mut status = 0;
            // ffgkey = fits_read_keyword; this gives the raw value string,
            // so strings keep their quotes and can be told apart from
            // numbers.
            fitsio_sys::ffgkey(
                self.fptr.as_raw(),
                key_ffi.as_ptr(),
                value.as_mut_ptr(),
                comment.as_mut_ptr(),
                &mut status,
            );
            match status {
                0 => Ok(Some(HeaderValue::parse(
                    &CStr::from_ptr(value.as_ptr()).to_string_lossy(),
                ))),
                KEY_NO_EXIST | VALUE_UNDEFINED => Ok(None),
                _ => self.check_status(status, extension, caller).map(|_| None),
            }
        }
    }

    fn check_status(
        &self,
        status: c_int,
        extension: &str,
        caller: &'static Location<'static>,
    ) -> Result<(), FitsError> {
        fitsio::errors::check_status(status).map_err(|e| FitsError::Fitsio {
            fits_error: Box::new(e),
            fits_filename: self.path.clone().into_boxed_path(),
            extension: extension.into(),
            source_file: caller.file(),
            source_line: caller.line(),
            source_column: caller.column(),
        })
    }
}
