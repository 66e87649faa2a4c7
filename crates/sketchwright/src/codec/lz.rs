//! LZ-string compression, base64 flavour
//!
//! The markdown format stores its payload with the `compressToBase64` /
//! `decompressFromBase64` pair from the lz-string JavaScript library. The
//! payload is read by a decompressor outside this crate, so the bit stream
//! has to match the library exactly:
//!
//! - input is processed as UTF-16 code units, not bytes or chars
//! - codes are written least-significant bit first, `num_bits` wide
//! - a code width grows after `2^num_bits` dictionary insertions
//! - the first sight of a unit emits a literal (tag 0 + 8 bits, or tag 1 +
//!   16 bits) instead of a dictionary code
//! - the stream ends with code 2 and is padded to a whole output char, then
//!   to a multiple of 4 chars with `=`

use std::collections::{HashMap, HashSet};

const BASE64_ALPHABET: &[u8; 65] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/=";

/// Bits carried by each base64 output char
const BASE64_BITS: u32 = 6;

/// Codes 0, 1 and 2 are reserved for the two literal tags and end-of-stream
const LITERAL_8: u32 = 0;
const LITERAL_16: u32 = 1;
const END_OF_STREAM: u32 = 2;

/// Compress `input` into the lz-string base64 alphabet
///
/// # Example
/// ```
/// use sketchwright::codec::lz::{compress_to_base64, decompress_from_base64};
///
/// let packed = compress_to_base64("hello hello hello hello");
/// assert_eq!(packed, "BYUwNmD2AEoTcq3FIA==");
/// assert_eq!(decompress_from_base64(&packed).as_deref(), Some("hello hello hello hello"));
/// ```
pub fn compress_to_base64(input: &str) -> String {
    let units: Vec<u16> = input.encode_utf16().collect();
    let mut packed = compress(&units, BASE64_BITS, |value| {
        BASE64_ALPHABET[value as usize] as char
    });
    match packed.len() % 4 {
        1 => packed.push_str("==="),
        2 => packed.push_str("=="),
        3 => packed.push('='),
        _ => {}
    }
    packed
}

/// Reverse [`compress_to_base64`]
///
/// Returns `None` for empty input, a corrupt or truncated stream, or a
/// result that is not valid UTF-16.
pub fn decompress_from_base64(input: &str) -> Option<String> {
    if input.is_empty() {
        return None;
    }
    let values: Vec<u32> = input.encode_utf16().map(base64_value).collect();
    let units = decompress(&values, 1 << (BASE64_BITS - 1))?;
    String::from_utf16(&units).ok()
}

/// Value of one base64 char; anything outside the alphabet reads as zero
fn base64_value(unit: u16) -> u32 {
    BASE64_ALPHABET
        .iter()
        .position(|&c| u16::from(c) == unit)
        .map_or(0, |position| position as u32)
}

/// Packs variable-width codes into output chars, LSB first
struct BitWriter<F> {
    bits_per_char: u32,
    to_char: F,
    value: u32,
    position: u32,
    out: String,
}

impl<F: Fn(u32) -> char> BitWriter<F> {
    fn new(bits_per_char: u32, to_char: F) -> Self {
        Self {
            bits_per_char,
            to_char,
            value: 0,
            position: 0,
            out: String::new(),
        }
    }

    fn write(&mut self, mut code: u32, width: u32) {
        for _ in 0..width {
            self.value = (self.value << 1) | (code & 1);
            if self.position == self.bits_per_char - 1 {
                self.position = 0;
                self.out.push((self.to_char)(self.value));
                self.value = 0;
            } else {
                self.position += 1;
            }
            code >>= 1;
        }
    }

    /// Shift the last partial char into place and emit it
    fn finish(mut self) -> String {
        loop {
            self.value <<= 1;
            if self.position == self.bits_per_char - 1 {
                self.out.push((self.to_char)(self.value));
                return self.out;
            }
            self.position += 1;
        }
    }
}

/// The current phrase: its dictionary code, plus the unit itself when the
/// phrase is a single unit
#[derive(Clone, Copy)]
struct Phrase {
    code: u32,
    unit: Option<u16>,
}

struct Compressor<F> {
    writer: BitWriter<F>,
    /// Codes of single units
    units: HashMap<u16, u32>,
    /// Codes of longer phrases, keyed by (prefix code, next unit)
    phrases: HashMap<(u32, u16), u32>,
    /// Units whose literal has not been written yet
    pending: HashSet<u16>,
    dict_size: u32,
    num_bits: u32,
    enlarge_in: u32,
}

impl<F: Fn(u32) -> char> Compressor<F> {
    fn new(writer: BitWriter<F>) -> Self {
        Self {
            writer,
            units: HashMap::new(),
            phrases: HashMap::new(),
            pending: HashSet::new(),
            dict_size: 3,
            num_bits: 2,
            enlarge_in: 2,
        }
    }

    fn next_code(&mut self) -> u32 {
        let code = self.dict_size;
        self.dict_size += 1;
        code
    }

    fn tick(&mut self) {
        self.enlarge_in -= 1;
        if self.enlarge_in == 0 {
            self.enlarge_in = 1 << self.num_bits;
            self.num_bits += 1;
        }
    }

    /// Write `phrase` as a literal on first sight, else as its code
    fn emit(&mut self, phrase: Phrase) {
        match phrase.unit {
            Some(unit) if self.pending.remove(&unit) => {
                if unit < 256 {
                    self.writer.write(LITERAL_8, self.num_bits);
                    self.writer.write(u32::from(unit), 8);
                } else {
                    self.writer.write(LITERAL_16, self.num_bits);
                    self.writer.write(u32::from(unit), 16);
                }
                self.tick();
            }
            _ => self.writer.write(phrase.code, self.num_bits),
        }
        self.tick();
    }

    fn run(mut self, input: &[u16]) -> String {
        let mut current: Option<Phrase> = None;

        for &unit in input {
            let unit_code = match self.units.get(&unit) {
                Some(&code) => code,
                None => {
                    let code = self.next_code();
                    self.units.insert(unit, code);
                    self.pending.insert(unit);
                    code
                }
            };
            let single = Phrase {
                code: unit_code,
                unit: Some(unit),
            };

            current = Some(match current {
                None => single,
                Some(phrase) => match self.phrases.get(&(phrase.code, unit)) {
                    Some(&code) => Phrase { code, unit: None },
                    None => {
                        self.emit(phrase);
                        let code = self.next_code();
                        self.phrases.insert((phrase.code, unit), code);
                        single
                    }
                },
            });
        }

        if let Some(phrase) = current {
            self.emit(phrase);
        }

        self.writer.write(END_OF_STREAM, self.num_bits);
        self.writer.finish()
    }
}

fn compress<F: Fn(u32) -> char>(input: &[u16], bits_per_char: u32, to_char: F) -> String {
    Compressor::new(BitWriter::new(bits_per_char, to_char)).run(input)
}

/// Reads variable-width codes back out of char values, LSB first
struct BitReader<'a> {
    values: &'a [u32],
    reset: u32,
    value: u32,
    position: u32,
    index: usize,
}

impl<'a> BitReader<'a> {
    fn new(values: &'a [u32], reset: u32) -> Self {
        Self {
            values,
            reset,
            value: values.first().copied().unwrap_or(0),
            position: reset,
            index: 1,
        }
    }

    fn read(&mut self, width: u32) -> u32 {
        let mut bits = 0;
        for bit in 0..width {
            let set = self.value & self.position != 0;
            self.position >>= 1;
            if self.position == 0 {
                self.position = self.reset;
                self.value = self.values.get(self.index).copied().unwrap_or(0);
                self.index += 1;
            }
            if set {
                bits |= 1 << bit;
            }
        }
        bits
    }

    /// True once every input char has been consumed
    fn exhausted(&self) -> bool {
        self.index > self.values.len()
    }
}

fn read_literal(reader: &mut BitReader<'_>, tag: u32) -> u16 {
    let width = if tag == LITERAL_8 { 8 } else { 16 };
    // A 16-bit read always fits
    reader.read(width) as u16
}

fn decompress(values: &[u32], reset: u32) -> Option<Vec<u16>> {
    let mut reader = BitReader::new(values, reset);
    // Entries 0..3 stand in for the reserved codes
    let mut dictionary: Vec<Vec<u16>> = vec![Vec::new(); 3];
    let mut enlarge_in: u32 = 4;
    let mut num_bits: u32 = 3;

    let first = match reader.read(2) {
        tag @ (LITERAL_8 | LITERAL_16) => read_literal(&mut reader, tag),
        END_OF_STREAM => return Some(Vec::new()),
        _ => return None,
    };
    dictionary.push(vec![first]);
    let mut previous = vec![first];
    let mut result = vec![first];

    loop {
        if reader.exhausted() {
            return None;
        }

        let mut code = reader.read(num_bits) as usize;
        match code as u32 {
            tag @ (LITERAL_8 | LITERAL_16) => {
                let unit = read_literal(&mut reader, tag);
                dictionary.push(vec![unit]);
                code = dictionary.len() - 1;
                enlarge_in -= 1;
            }
            END_OF_STREAM => return Some(result),
            _ => {}
        }

        if enlarge_in == 0 {
            enlarge_in = 1 << num_bits;
            num_bits += 1;
        }

        let entry = if code < dictionary.len() {
            dictionary[code].clone()
        } else if code == dictionary.len() {
            let mut entry = previous.clone();
            entry.push(previous[0]);
            entry
        } else {
            return None;
        };

        result.extend_from_slice(&entry);
        let mut phrase = previous;
        phrase.push(entry[0]);
        dictionary.push(phrase);
        enlarge_in -= 1;
        previous = entry;

        if enlarge_in == 0 {
            enlarge_in = 1 << num_bits;
            num_bits += 1;
        }
    }
}
