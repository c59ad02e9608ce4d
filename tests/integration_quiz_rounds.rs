use wordclass::analysis::{Analyzer, Analyzers, Category};
use wordclass::game::{Action, Game, GameSettings, Phase};
use wordclass::language::{
    Difficulty, Language, Origin, SentenceBanks, SentenceProvider, SentenceSource,
};

fn analyzers() -> Analyzers {
    Analyzers::embedded().expect("embedded lexicons load")
}

fn banks() -> SentenceBanks {
    SentenceBanks::embedded().expect("embedded sentence banks load")
}

#[test]
fn bank_sentences_fall_inside_their_tier_band() {
    let analyzers = analyzers();
    let banks = banks();

    for language in Language::ALL {
        for difficulty in Difficulty::ALL {
            let sentences = banks.get(language).sentences(difficulty);
            assert!(!sentences.is_empty(), "{language} {difficulty} is empty");

            for sentence in sentences {
                let count = analyzers.word_count(sentence, language);
                assert!(
                    difficulty.band().contains(&count),
                    "{language} {difficulty}: {count} words in {sentence:?}"
                );
            }
        }
    }
}

#[test]
fn bank_sentences_are_fully_covered_by_the_lexicons() {
    let analyzers = analyzers();
    let banks = banks();

    for language in Language::ALL {
        for difficulty in Difficulty::ALL {
            for sentence in banks.get(language).sentences(difficulty) {
                let unknown: Vec<_> = analyzers
                    .get(language)
                    .tag(sentence)
                    .into_iter()
                    .filter(|token| !token.known)
                    .map(|token| token.text)
                    .collect();
                assert!(unknown.is_empty(), "{sentence:?} has unknown words {unknown:?}");
            }
        }
    }
}

#[test]
fn every_bank_sentence_has_something_to_classify() {
    let analyzers = analyzers();
    let banks = banks();

    for language in Language::ALL {
        for difficulty in Difficulty::ALL {
            for sentence in banks.get(language).sentences(difficulty) {
                assert!(
                    !analyzers.analyze(sentence, language).is_empty(),
                    "{sentence:?} has no quiz words"
                );
            }
        }
    }
}

#[test]
fn analysis_is_deterministic() {
    let analyzers = analyzers();
    let banks = banks();

    for language in Language::ALL {
        for sentence in banks.get(language).sentences(Difficulty::Hard) {
            assert_eq!(
                analyzers.analyze(sentence, language),
                analyzers.analyze(sentence, language)
            );
        }
    }
}

#[test]
fn seeded_sources_draw_the_same_sentences() {
    let mut a = SentenceSource::new(banks()).with_seed(7);
    let mut b = SentenceSource::new(banks()).with_seed(7);

    for _ in 0..10 {
        for language in Language::ALL {
            let left = a.sentence(language, Difficulty::Medium);
            let right = b.sentence(language, Difficulty::Medium);
            assert_eq!(left, right);
            assert_eq!(left.origin, Origin::Local);
        }
    }
}

#[test]
fn cat_on_the_mat_round() {
    let source = SentenceSource::new(banks()).with_custom("The cat sat on the mat.");
    let mut game = Game::new(GameSettings::default(), source, analyzers());

    game.apply(Action::Start);
    let words: Vec<(String, Category)> = game
        .session()
        .unwrap()
        .words()
        .iter()
        .map(|word| (word.text.clone(), word.category))
        .collect();
    assert_eq!(
        words,
        vec![
            ("cat".to_string(), Category::Noun),
            ("sat".to_string(), Category::Verb),
            ("on".to_string(), Category::Preposition),
            ("mat".to_string(), Category::Noun),
        ]
    );

    for category in [Category::Noun, Category::Adjective, Category::Preposition, Category::Noun] {
        game.apply(Action::Choose(category));
        game.apply(Action::Continue);
    }

    assert_eq!(game.phase(), &Phase::Results);
    let session = game.session().unwrap();
    assert_eq!(session.correct(), 3);
    assert_eq!(session.total(), 4);
    assert_eq!(session.accuracy(), 75.0);

    let breakdown = session.category_breakdown();
    assert_eq!(breakdown[&Category::Noun].correct, 2);
    assert_eq!(breakdown[&Category::Verb].correct, 0);
}

#[test]
fn thai_round_from_the_bank() {
    let source = SentenceSource::new(banks()).with_seed(3);
    let settings = GameSettings {
        language: Language::Thai,
        ..GameSettings::default()
    };
    let mut game = Game::new(settings, source, analyzers());

    game.apply(Action::Start);
    assert_eq!(game.phase(), &Phase::Playing);
    assert_eq!(game.origin(), Some(Origin::Local));

    let expected: Vec<Category> = game
        .session()
        .unwrap()
        .words()
        .iter()
        .map(|word| word.category)
        .collect();
    for category in &expected {
        game.apply(Action::Choose(*category));
        game.apply(Action::Continue);
    }

    assert_eq!(game.phase(), &Phase::Results);
    assert_eq!(game.session().unwrap().accuracy(), 100.0);
}
