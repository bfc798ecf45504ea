//! Morphological stems
//!
//! Two words with the same stem are inflections of one root (CAT/CATS,
//! JUMP/JUMPED). Recombining a word into one of its own inflections is
//! not a snatch.
//!
//! This is Porter's 1980 algorithm, including the two changes made in his
//! reference implementation (`bli` -> `ble`, `logi` -> `log`). Porter2 is
//! not a drop-in replacement: it maps FAIR and FAIRLY to one stem, for
//! example, which would block that snatch.

/// Step 2 rewrites, applied when the remaining stem has measure > 0
const STEP2: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("bli", "ble"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
    ("logi", "log"),
];

/// Step 3 rewrites, applied when the remaining stem has measure > 0
const STEP3: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

/// Step 4 removals, applied when the remaining stem has measure > 1
const STEP4: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ou", "ism",
    "ate", "iti", "ous", "ive", "ize",
];

/// Stem of a word, lowercase. Case of the input does not matter.
pub fn stem(word: &str) -> String {
    let mut w: Vec<char> = word.to_lowercase().chars().collect();
    if w.len() < 3 {
        return w.into_iter().collect();
    }

    // A leading y is always a consonant
    let initial_y = w[0] == 'y';
    if initial_y {
        w[0] = 'Y';
    }

    step1a(&mut w);
    step1b(&mut w);
    step1c(&mut w);
    replace_longest(&mut w, STEP2);
    replace_longest(&mut w, STEP3);
    step4(&mut w);
    step5(&mut w);

    if initial_y {
        w[0] = 'y';
    }
    w.into_iter().collect()
}

fn step1a(w: &mut Vec<char>) {
    if strip(w, "sses").is_some() || strip(w, "ies").is_some() {
        w.truncate(w.len() - 2);
    } else if let Some(stem) = strip(w, "s") {
        if w[stem - 1] != 's' {
            w.truncate(stem);
        }
    }
}

fn step1b(w: &mut Vec<char>) {
    if let Some(stem) = strip(w, "eed") {
        if measure(&w[..stem]) > 0 {
            w.pop();
        }
        return;
    }

    let word: &[char] = w;
    let Some(stem) = strip(word, "ed")
        .or_else(|| strip(word, "ing"))
        .filter(|&stem| has_vowel(&word[..stem]))
    else {
        return;
    };
    w.truncate(stem);

    if ends_with(w, "at") || ends_with(w, "bl") || ends_with(w, "iz") {
        w.push('e');
    } else if ends_double_consonant(w) {
        w.pop();
    } else if measure(w) == 1 && ends_cvc(w) {
        w.push('e');
    }
}

fn step1c(w: &mut [char]) {
    if let Some(stem) = strip(w, "y") {
        if has_vowel(&w[..stem]) {
            w[stem] = 'i';
        }
    }
}

/// Rewrite the longest matching suffix, if its stem has measure > 0.
/// Shorter suffixes are not tried when the longest one fails.
fn replace_longest(w: &mut Vec<char>, rules: &[(&str, &str)]) {
    let word: &[char] = w;
    let longest = rules
        .iter()
        .filter_map(|(suffix, replacement)| strip(word, suffix).map(|stem| (stem, *replacement)))
        .min_by_key(|(stem, _)| *stem);

    if let Some((stem, replacement)) = longest {
        if measure(&w[..stem]) > 0 {
            w.truncate(stem);
            w.extend(replacement.chars());
        }
    }
}

fn step4(w: &mut Vec<char>) {
    let word: &[char] = w;
    let longest = STEP4.iter().filter_map(|suffix| strip(word, suffix)).min();

    if let Some(stem) = longest {
        if measure(&w[..stem]) > 1 {
            w.truncate(stem);
        }
    } else if let Some(stem) = strip(w, "ion") {
        if matches!(w[stem - 1], 's' | 't') && measure(&w[..stem]) > 1 {
            w.truncate(stem);
        }
    }
}

fn step5(w: &mut Vec<char>) {
    if let Some(stem) = strip(w, "e") {
        let m = measure(&w[..stem]);
        if m > 1 || (m == 1 && !ends_cvc(&w[..stem])) {
            w.truncate(stem);
        }
    }
    if ends_with(w, "ll") && measure(w) > 1 {
        w.pop();
    }
}

fn is_consonant(w: &[char], i: usize) -> bool {
    match w[i] {
        'a' | 'e' | 'i' | 'o' | 'u' => false,
        'y' => i == 0 || !is_consonant(w, i - 1),
        _ => true,
    }
}

/// Porter's m: the number of vowel-run/consonant-run pairs
fn measure(w: &[char]) -> usize {
    let mut m = 0;
    let mut after_vowel = false;
    for i in 0..w.len() {
        let consonant = is_consonant(w, i);
        if after_vowel && consonant {
            m += 1;
        }
        after_vowel = !consonant;
    }
    m
}

fn has_vowel(w: &[char]) -> bool {
    (0..w.len()).any(|i| !is_consonant(w, i))
}

/// Ends in a doubled consonant other than l, s or z
fn ends_double_consonant(w: &[char]) -> bool {
    let n = w.len();
    n >= 2
        && w[n - 1] == w[n - 2]
        && !matches!(w[n - 1], 'a' | 'e' | 'i' | 'o' | 'u' | 'y' | 'l' | 's' | 'z')
}

/// Ends consonant-vowel-consonant, the last not w, x or y
fn ends_cvc(w: &[char]) -> bool {
    let n = w.len();
    n >= 3
        && is_consonant(w, n - 3)
        && !is_consonant(w, n - 2)
        && is_consonant(w, n - 1)
        && !matches!(w[n - 1], 'w' | 'x' | 'y')
}

fn ends_with(w: &[char], suffix: &str) -> bool {
    let n = suffix.chars().count();
    w.len() >= n && w[w.len() - n..].iter().copied().eq(suffix.chars())
}

/// Stem length if `w` ends with `suffix` and something is left before it
fn strip(w: &[char], suffix: &str) -> Option<usize> {
    let n = suffix.chars().count();
    (w.len() > n && ends_with(w, suffix)).then(|| w.len() - n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stems(pairs: &[(&str, &str)]) {
        for (word, expected) in pairs {
            assert_eq!(stem(word), *expected, "stem of {}", word);
        }
    }

    #[test]
    fn test_plural_shares_stem() {
        assert_eq!(stem("CAT"), stem("CATS"));
        assert_eq!(stem("JUMP"), stem("JUMPED"));
        assert_eq!(stem("JUMPING"), stem("JUMPS"));
    }

    #[test]
    fn test_anagrams_do_not_share_stem() {
        assert_ne!(stem("CAT"), stem("TALC"));
        assert_ne!(stem("CAT"), stem("ACT"));
    }

    #[test]
    fn test_ly_suffix_changes_stem() {
        assert_eq!(stem("FAIR"), "fair");
        assert_eq!(stem("FAIRLY"), "fairli");
        assert_ne!(stem("FAIR"), stem("FAIRLY"));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(stem("Cats"), stem("CATS"));
        assert_eq!(stem("cats"), "cat");
    }

    #[test]
    fn test_step1() {
        stems(&[
            ("caresses", "caress"),
            ("ponies", "poni"),
            ("ties", "ti"),
            ("caress", "caress"),
            ("feed", "feed"),
            ("agreed", "agre"),
            ("plastered", "plaster"),
            ("bled", "bled"),
            ("motoring", "motor"),
            ("sing", "sing"),
            ("hopping", "hop"),
            ("falling", "fall"),
            ("hissing", "hiss"),
            ("filing", "file"),
            ("happy", "happi"),
            ("sky", "sky"),
        ]);
    }

    #[test]
    fn test_later_steps() {
        stems(&[
            ("relational", "relat"),
            ("conditional", "condit"),
            ("generalization", "gener"),
            ("generate", "gener"),
            ("hopeful", "hope"),
            ("goodness", "good"),
            ("allowance", "allow"),
            ("adjustable", "adjust"),
            ("controll", "control"),
            ("roll", "roll"),
        ]);
    }

    #[test]
    fn test_short_and_leading_y() {
        assert_eq!(stem("AS"), "as");
        assert_eq!(stem("YELLS"), "yell");
        assert_eq!(stem("YAY"), "yai");
    }
}
