use crate::analysis::english::tokenize_words;
use crate::analysis::lexicon::Lexicon;
use crate::analysis::{Analyzer, Category, TagMapping, TaggedToken};
use crate::error::LexiconError;
use crate::language::Language;

const MAI_YAMOK: char = 'ๆ';
const PAIYANNOI: char = 'ฯ';

/// Lexicon-driven ORCHID tagger for Thai, with dictionary word segmentation
#[derive(Debug, Clone)]
pub struct ThaiAnalyzer {
    lexicon: Lexicon,
}

/// A piece of segmented text and whether the lexicon knows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub known: bool,
}

fn in_thai_block(c: char) -> bool {
    ('\u{0E00}'..='\u{0E7F}').contains(&c)
}

fn is_thai_letter(c: char) -> bool {
    in_thai_block(c) && c != MAI_YAMOK && c != PAIYANNOI
}

/// True when more than half of the characters are Thai script
pub fn is_mostly_thai(text: &str) -> bool {
    let total = text.chars().count();
    let thai = text.chars().filter(|c| in_thai_block(*c)).count();
    thai * 2 > total
}

/// Split a whitespace-free chunk into (run, is_thai) pieces. The repetition
/// and abbreviation marks separate runs and are dropped.
fn split_runs(chunk: &str) -> Vec<(String, bool)> {
    let mut runs: Vec<(String, bool)> = Vec::new();
    let mut current = String::new();
    let mut current_thai = false;

    for c in chunk.chars() {
        if c == MAI_YAMOK || c == PAIYANNOI {
            if !current.is_empty() {
                runs.push((std::mem::take(&mut current), current_thai));
            }
            continue;
        }

        let thai = is_thai_letter(c);
        if !current.is_empty() && thai != current_thai {
            runs.push((std::mem::take(&mut current), current_thai));
        }
        current_thai = thai;
        current.push(c);
    }

    if !current.is_empty() {
        runs.push((current, current_thai));
    }
    runs
}

type Cost = (usize, usize); // (uncovered characters, tokens)

/// Keep `cost` for `end` only if it beats what is there. Equal costs keep the
/// earlier path.
fn relax(
    best: &mut [Option<Cost>],
    back: &mut [(usize, bool)],
    end: usize,
    cost: Cost,
    step: (usize, bool),
) {
    if best[end].map_or(true, |current| cost < current) {
        best[end] = Some(cost);
        back[end] = step;
    }
}

impl ThaiAnalyzer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn embedded() -> Result<Self, LexiconError> {
        Ok(Self::new(Lexicon::embedded(Language::Thai)?))
    }

    /// Maximal-matching segmentation of a run of Thai letters.
    ///
    /// Minimises uncovered characters first and token count second. Ties keep
    /// the first path found, scanning start positions then lengths upward.
    pub fn segment_run(&self, run: &str) -> Vec<Segment> {
        let chars: Vec<char> = run.chars().collect();
        let n = chars.len();
        let longest = self.lexicon.longest_word().max(1);

        let mut best: Vec<Option<Cost>> = vec![None; n + 1];
        let mut back: Vec<(usize, bool)> = vec![(0, false); n + 1];
        best[0] = Some((0, 0));

        for start in 0..n {
            let Some((uncovered, tokens)) = best[start] else {
                continue;
            };

            let mut candidate = String::new();
            for end in start + 1..=(start + longest).min(n) {
                candidate.push(chars[end - 1]);
                if self.lexicon.contains(&candidate) {
                    relax(&mut best, &mut back, end, (uncovered, tokens + 1), (start, true));
                }
            }
            relax(&mut best, &mut back, start + 1, (uncovered + 1, tokens + 1), (start, false));
        }

        let mut pieces = Vec::new();
        let mut end = n;
        while end > 0 {
            let (start, known) = back[end];
            pieces.push(Segment {
                text: chars[start..end].iter().collect(),
                known,
            });
            end = start;
        }
        pieces.reverse();

        let mut merged: Vec<Segment> = Vec::with_capacity(pieces.len());
        for piece in pieces {
            match merged.last_mut() {
                Some(last) if !last.known && !piece.known => last.text.push_str(&piece.text),
                _ => merged.push(piece),
            }
        }
        merged
    }

    /// Segment a whole sentence: whitespace and script changes split first,
    /// then Thai runs go through [`ThaiAnalyzer::segment_run`].
    pub fn segments(&self, sentence: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        for chunk in sentence.split_whitespace() {
            for (run, thai) in split_runs(chunk) {
                if thai {
                    segments.extend(self.segment_run(&run));
                } else {
                    segments.extend(tokenize_words(&run).into_iter().map(|text| Segment {
                        known: self.lexicon.contains(&text.to_lowercase()),
                        text,
                    }));
                }
            }
        }
        segments
    }
}

fn guess_tag(text: &str) -> &'static str {
    if text.chars().all(|c| c.is_numeric()) {
        "NCNM"
    } else if text.chars().any(in_thai_block) {
        "NCMN"
    } else {
        // loanwords and names written in Latin script
        "NPRP"
    }
}

/// Common and proper nouns, numerals and classifiers
const NOUN_TAGS: [&str; 11] = [
    "NPRP", "NCMN", "NTTL", "NLBL", "NCNM", "NONM", "CNIT", "CLTV", "CMTR", "CFQC", "CVBL",
];

fn is_noun_tag(tag: &str) -> bool {
    NOUN_TAGS.contains(&tag)
}

fn resolve(candidates: &[String], previous: Option<&str>, next: Option<&[String]>) -> String {
    let has = |tag: &str| candidates.iter().any(|c| c == tag);

    if has("PREL") && has("RPRE") {
        let noun_follows = next
            .and_then(|tags| tags.first())
            .is_some_and(|tag| is_noun_tag(tag));
        return if noun_follows { "RPRE" } else { "PREL" }.to_string();
    }

    if has("VATT") && has("ADVN") {
        let after_verb = previous.is_some_and(|tag| {
            (tag.starts_with('V') && tag != "VATT") || tag.starts_with('X')
        });
        return if after_verb { "ADVN" } else { "VATT" }.to_string();
    }

    candidates[0].clone()
}

impl Analyzer for ThaiAnalyzer {
    fn language(&self) -> Language {
        Language::Thai
    }

    fn tokenize(&self, sentence: &str) -> Vec<String> {
        self.segments(sentence)
            .into_iter()
            .map(|segment| segment.text)
            .collect()
    }

    fn tag(&self, sentence: &str) -> Vec<TaggedToken> {
        let segments = self.segments(sentence);

        let looked_up: Vec<(Vec<String>, Option<String>)> = segments
            .iter()
            .map(|segment| match self.lexicon.lookup(&segment.text) {
                Some(entry) => (entry.tags.clone(), entry.gloss.clone()),
                None => (vec![guess_tag(&segment.text).to_string()], None),
            })
            .collect();

        let mut tagged: Vec<TaggedToken> = Vec::with_capacity(segments.len());
        for (position, (segment, (candidates, gloss))) in
            segments.into_iter().zip(looked_up.iter()).enumerate()
        {
            let previous = tagged.last().map(|prev| prev.tag.as_str());
            let next = looked_up.get(position + 1).map(|(tags, _)| tags.as_slice());

            let tag = resolve(candidates, previous, next);
            tagged.push(TaggedToken {
                text: segment.text,
                tag,
                gloss: gloss.clone(),
                known: segment.known,
            });
        }

        tagged
    }

    /// ORCHID tags to quiz categories. Classifiers count as nouns; auxiliary
    /// verbs count as verbs; negation counts as an adverb.
    fn map_tag(&self, tag: &str) -> TagMapping {
        match tag {
            tag if is_noun_tag(tag) => TagMapping::Quiz(Category::Noun),
            "PPRS" | "PDMN" | "PNTR" | "PREL" => TagMapping::Quiz(Category::Pronoun),
            "VACT" | "VSTA" | "XVBM" | "XVAM" | "XVMM" | "XVBB" | "XVAE" => {
                TagMapping::Quiz(Category::Verb)
            }
            "VATT" => TagMapping::Quiz(Category::Adjective),
            "ADVN" | "ADVI" | "ADVP" | "ADVS" | "NEG" => TagMapping::Quiz(Category::Adverb),
            "RPRE" => TagMapping::Quiz(Category::Preposition),
            "JCRG" | "JCMP" | "JSBR" => TagMapping::Quiz(Category::Conjunction),
            "INT" => TagMapping::Quiz(Category::Interjection),
            "DDAN" | "DDAC" | "DDBQ" | "DDAQ" | "DIAC" | "DIBQ" | "DIAQ" | "DCNM" | "DONM"
            | "EAFF" | "EITT" | "PUNC" => TagMapping::Skip,
            _ => TagMapping::Unmapped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> ThaiAnalyzer {
        ThaiAnalyzer::embedded().unwrap()
    }

    fn tagged(sentence: &str) -> Vec<(String, String)> {
        analyzer()
            .tag(sentence)
            .into_iter()
            .map(|t| (t.text, t.tag))
            .collect()
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    #[test]
    fn segments_unspaced_sentence() {
        assert_eq!(
            analyzer().tokenize("แมวนอนบนโต๊ะ"),
            vec!["แมว", "นอน", "บน", "โต๊ะ"]
        );
    }

    #[test]
    fn prefers_longest_covering_words() {
        let words = analyzer().tokenize("ฉันไปโรงเรียน");
        assert_eq!(words, vec!["ฉัน", "ไป", "โรงเรียน"]);
    }

    #[test]
    fn adjacent_unknown_characters_merge() {
        let segments = analyzer().segments("แมวกินปลา");
        assert_eq!(
            segments.last(),
            Some(&Segment {
                text: "ปลา".to_string(),
                known: false
            })
        );
        assert_eq!(segments.len(), 3);
    }

    #[test]
    fn latin_runs_split_from_thai() {
        let segments = analyzer().segments("ฉันชอบAIมาก");
        let texts: Vec<&str> = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["ฉัน", "ชอบ", "AI", "มาก"]);

        let tags = tagged("ฉันชอบ AI มาก");
        assert_eq!(tags[2], ("AI".to_string(), "NPRP".to_string()));
    }

    #[test]
    fn repetition_mark_is_dropped() {
        assert_eq!(analyzer().tokenize("เด็กๆ เล่น"), vec!["เด็ก", "เล่น"]);
    }

    #[test]
    fn relative_marker_before_noun_is_preposition() {
        let tags = tagged("ฉันไปโรงเรียนที่บ้าน");
        assert_eq!(tags[3], ("ที่".to_string(), "RPRE".to_string()));

        let tags = tagged("บ้านที่สวย");
        assert_eq!(tags[1], ("ที่".to_string(), "PREL".to_string()));
    }

    #[test]
    fn relative_marker_before_negation_is_pronoun() {
        let tags = tagged("คนที่ไม่มา");
        assert_eq!(tags[1], ("ที่".to_string(), "PREL".to_string()));
        assert_eq!(tags[2], ("ไม่".to_string(), "NEG".to_string()));

        let words = analyzer().analyze("คนที่ไม่มา");
        assert_eq!(words[1].category, Category::Pronoun);
    }

    #[test]
    fn attributive_after_verb_becomes_adverb() {
        assert_eq!(
            tagged("เขาวิ่งดี"),
            pairs(&[("เขา", "PPRS"), ("วิ่ง", "VACT"), ("ดี", "ADVN")])
        );
        assert_eq!(tagged("บ้านดี"), pairs(&[("บ้าน", "NCMN"), ("ดี", "VATT")]));
    }

    #[test]
    fn polite_particle_is_not_quizzed() {
        let words = analyzer().analyze("ว้าว! สวยมากครับ");
        let texts: Vec<(&str, Category)> =
            words.iter().map(|w| (w.text.as_str(), w.category)).collect();
        assert_eq!(
            texts,
            vec![
                ("ว้าว", Category::Interjection),
                ("สวย", Category::Adjective),
                ("มาก", Category::Adverb),
            ]
        );
    }

    #[test]
    fn thai_ratio_check() {
        assert!(is_mostly_thai("แมวนอนบนโต๊ะ"));
        assert!(is_mostly_thai("ฉันชอบ AI มาก"));
        assert!(!is_mostly_thai("The cat sat on the mat."));
        assert!(!is_mostly_thai(""));
    }

    #[test]
    fn exactly_half_thai_is_not_thai() {
        assert!(!is_mostly_thai("กขab"));
        assert!(is_mostly_thai("กขคab"));
    }

    #[test]
    fn unknown_tags_guessed() {
        assert_eq!(guess_tag("2567"), "NCNM");
        assert_eq!(guess_tag("ปลา"), "NCMN");
        assert_eq!(guess_tag("Bangkok"), "NPRP");
    }

    #[test]
    fn skipped_and_unmapped_tags() {
        let analyzer = analyzer();
        assert_eq!(analyzer.map_tag("EAFF"), TagMapping::Skip);
        assert_eq!(analyzer.map_tag("NEG"), TagMapping::Quiz(Category::Adverb));
        assert_eq!(analyzer.map_tag("FIXN"), TagMapping::Unmapped);
    }
}
