//! Испанская сортировка строк для списков и алфавитной группировки
//!
//! Сравнение трёхуровневое, как у `Intl.Collator("es", { sensitivity: "variant" })`:
//! 1. базовые буквы без учёта регистра и акцентов, `Ñ` как отдельная буква между `N` и `O`;
//! 2. акценты (`a` < `á`);
//! 3. регистр (строчные раньше заглавных).

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Алфавит для панели быстрого перехода по буквам
pub const SPANISH_ALPHABET: [&str; 27] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "Ñ", "O", "P", "Q",
    "R", "S", "T", "U", "V", "W", "X", "Y", "Z",
];

/// Ключ корзины для имён, которые не начинаются с буквы (цифры, символы, пустые)
pub const FALLBACK_BUCKET: &str = "#";

const COMBINING_TILDE: char = '\u{0303}';

/// Буква в верхнем регистре, по которой символ сортируется и группируется.
/// `None`, если заглавная форма не один символ (`ß` -> "SS").
fn fold_letter(base: char) -> Option<char> {
    let mut upper = base.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Первичный вес символа
fn primary_weight(base: char, has_tilde: bool) -> u32 {
    match base {
        // пробелы и пунктуация идут раньше всего, не-ASCII символы после ASCII
        c if !c.is_alphanumeric() => {
            if c.is_ascii() {
                c as u32
            } else {
                0xFF
            }
        }
        '0'..='9' => 0x100 + (base as u32 - '0' as u32),
        c if !c.is_alphabetic() => 0x10A,
        c => match fold_letter(c) {
            Some(upper @ 'A'..='Z') => {
                let idx = (upper as u32 - 'A' as u32) * 2;
                // ñ сразу после n
                if upper == 'N' && has_tilde {
                    0x200 + idx + 1
                } else {
                    0x200 + idx
                }
            }
            Some(upper) => 0x1000 + upper as u32,
            // в одну корзину с цифрами и символами
            None => 0x10A,
        },
    }
}

/// Разложенный символ: база + диакритика
struct Unit {
    base: char,
    marks: Vec<char>,
}

fn decompose(s: &str) -> Vec<Unit> {
    let mut units: Vec<Unit> = Vec::new();
    for c in s.nfd() {
        if is_combining_mark(c) {
            if let Some(last) = units.last_mut() {
                last.marks.push(c);
                continue;
            }
        }
        units.push(Unit {
            base: c,
            marks: Vec::new(),
        });
    }
    units
}

/// Сортировочный ключ строки
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: Vec<u32>,
    secondary: Vec<u32>,
    tertiary: Vec<u8>,
}

impl CollationKey {
    pub fn new(s: &str) -> Self {
        let units = decompose(s.trim());
        let mut primary = Vec::with_capacity(units.len());
        let mut secondary = Vec::with_capacity(units.len());
        let mut tertiary = Vec::with_capacity(units.len());

        for unit in &units {
            let has_tilde = unit.marks.contains(&COMBINING_TILDE);
            let is_enye = has_tilde && unit.base.eq_ignore_ascii_case(&'n');
            primary.push(primary_weight(unit.base, has_tilde));

            // тильда у Ñ уже учтена на первом уровне
            let accent: u32 = unit
                .marks
                .iter()
                .filter(|m| !(is_enye && **m == COMBINING_TILDE))
                .map(|m| *m as u32)
                .sum();
            secondary.push(accent);
            tertiary.push(u8::from(unit.base.is_uppercase()));
        }

        Self {
            primary,
            secondary,
            tertiary,
        }
    }
}

/// Сравнение двух строк по испанским правилам
pub fn compare(a: &str, b: &str) -> Ordering {
    CollationKey::new(a)
        .cmp(&CollationKey::new(b))
        .then_with(|| a.cmp(b))
}

/// Ключ алфавитной корзины: первая буква в верхнем регистре без акцента,
/// `Ñ` остаётся собой; всё остальное попадает в [`FALLBACK_BUCKET`].
///
/// Ключ строится из того же [`fold_letter`], что и первичный вес, поэтому
/// каждая корзина покрывает непрерывный отрезок отсортированного списка.
pub fn bucket_key(name: &str) -> String {
    let units = decompose(name.trim());
    let Some(first) = units.first() else {
        return FALLBACK_BUCKET.to_string();
    };
    if !first.base.is_alphabetic() {
        return FALLBACK_BUCKET.to_string();
    }
    match fold_letter(first.base) {
        Some('N') if first.marks.contains(&COMBINING_TILDE) => "Ñ".to_string(),
        Some(upper) => upper.to_string(),
        None => FALLBACK_BUCKET.to_string(),
    }
}
