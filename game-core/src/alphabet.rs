use game_types::GameError;

/// The guessable keyboard, in display order.
pub const ALPHABET: [char; 29] = [
    'ا', 'ب', 'ت', 'ث', 'ج', 'ح', 'خ', 'د', 'ذ', 'ر', 'ز', 'س', 'ش', 'ص', 'ض', 'ط', 'ظ', 'ع', 'غ',
    'ف', 'ق', 'ك', 'ل', 'م', 'ن', 'ه', 'و', 'ي', 'ء',
];

/// Letterforms accepted in a secret word that fold onto a keyboard letter.
pub const VARIANT_FORMS: [char; 7] = ['أ', 'إ', 'آ', 'ة', 'ى', 'ؤ', 'ئ'];

/// Fold a character to its canonical keyboard letter. Whitespace folds to a
/// plain space; anything else outside the fold table is returned unchanged.
pub fn normalize(ch: char) -> char {
    match ch {
        'أ' | 'إ' | 'آ' => 'ا',
        'ة' => 'ه',
        'ى' => 'ي',
        'ؤ' | 'ئ' => 'ء',
        c if c.is_whitespace() => ' ',
        c => c,
    }
}

/// Fold every character of a word. The result has the same number of chars
/// as the input, so positions line up with the raw word.
pub fn normalize_word(word: &str) -> String {
    word.chars().map(normalize).collect()
}

pub fn is_guessable(ch: char) -> bool {
    ALPHABET.contains(&ch)
}

/// Check if a character may appear in a secret word
pub fn is_word_char(ch: char) -> bool {
    ch.is_whitespace() || is_guessable(ch) || VARIANT_FORMS.contains(&ch)
}

/// Trim and validate a secret word, returning the trimmed raw text.
pub fn validate_secret_word(raw: &str) -> Result<&str, GameError> {
    let word = raw.trim();
    if word.is_empty() {
        return Err(GameError::EmptyInput);
    }
    if !word.chars().all(is_word_char) {
        return Err(GameError::InvalidCharacterSet);
    }
    Ok(word)
}
