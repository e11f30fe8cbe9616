//! Tone-number to tone-mark conversion for pinyin readings.
//!
//! `ni3 hao3` becomes `nǐ hǎo`. A tone digit `1`-`4` marks the main vowel of
//! the run of letters right before it: `a` or `e` if present, the `o` of
//! `ou`, otherwise the last vowel. `v` stands in for `ü`, with or without a
//! tone. Anything else passes through untouched.

/// Tone-marked forms for tones 1 to 4, per lowercase vowel.
const TONE_MARKS: [(char, [char; 4]); 6] = [
    ('a', ['ā', 'á', 'ǎ', 'à']),
    ('e', ['ē', 'é', 'ě', 'è']),
    ('i', ['ī', 'í', 'ǐ', 'ì']),
    ('o', ['ō', 'ó', 'ǒ', 'ò']),
    ('u', ['ū', 'ú', 'ǔ', 'ù']),
    ('v', ['ǖ', 'ǘ', 'ǚ', 'ǜ']),
];

/// Applied after tone marks so numbered `v` is never split.
const BARE_V: (char, &str) = ('v', "ü");

/// Replace tone-numbered syllables with their accented forms.
pub fn escape(reading: &str) -> String {
    let mut escaped = String::with_capacity(reading.len());
    let mut syllable = String::new();

    for ch in reading.chars() {
        if ch.is_ascii_alphabetic() {
            syllable.push(ch);
            continue;
        }

        let tone = ch.to_digit(10).filter(|tone| (1..=4).contains(tone));
        match tone.and_then(|tone| mark_syllable(&syllable, tone as usize)) {
            Some(marked) => escaped.push_str(&marked),
            None => {
                escaped.push_str(&syllable);
                escaped.push(ch);
            }
        }
        syllable.clear();
    }
    escaped.push_str(&syllable);

    escaped.replace(BARE_V.0, BARE_V.1)
}

fn tone_marks(vowel: char) -> Option<&'static [char; 4]> {
    TONE_MARKS
        .iter()
        .find(|(candidate, _)| *candidate == vowel)
        .map(|(_, marks)| marks)
}

/// `None` when the syllable has no vowel to carry the tone.
fn mark_syllable(syllable: &str, tone: usize) -> Option<String> {
    let position = syllable
        .find(|c: char| c == 'a' || c == 'e')
        .or_else(|| syllable.find("ou"))
        .or_else(|| syllable.rfind(|c: char| tone_marks(c).is_some()))?;

    let vowel = syllable[position..].chars().next()?;
    let marked = tone_marks(vowel)?[tone - 1];

    let mut result = String::with_capacity(syllable.len() + marked.len_utf8());
    result.push_str(&syllable[..position]);
    result.push(marked);
    result.push_str(&syllable[position + vowel.len_utf8()..]);
    Some(result)
}
