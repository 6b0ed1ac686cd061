pub fn run() {
    let langs = glex_langs::all();
    println!("Bundled grammars ({}):", langs.len());
    for lang in langs {
        let aliases: Vec<&str> = lang
            .aliases()
            .iter()
            .copied()
            .filter(|a| *a != lang.name())
            .collect();
        if aliases.is_empty() {
            println!("  {}", lang.name());
        } else {
            println!("  {} ({})", lang.name(), aliases.join(", "));
        }
    }
}
