use danki::vocab::{VocabEntry, VocabTable};

/// Ranks 1, 2, 3, 150 and 900 so tests can aim filters at known subsets.
pub fn verb_table() -> VocabTable {
    VocabTable::from_entries(vec![
        VocabEntry::new(1, "être", "ser"),
        VocabEntry::new(2, "avoir", "ter"),
        VocabEntry::new(3, "faire", "fazer"),
        VocabEntry::new(150, "apprendre", "aprender"),
        VocabEntry::new(900, "rejoindre", "juntar-se"),
    ])
}

pub const VERB_TSV: &str = "Rank\tFrancês\tPortuguês\n\
1\têtre\tser\n\
2\tavoir\tter\n\
3\tfaire\tfazer\n";
