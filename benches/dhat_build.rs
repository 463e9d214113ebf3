use dhat::{Alloc, Profiler};

use liblexicon::pipeline::build_at;

use fixtures::{DictOptions, make_site};

#[global_allocator]
static ALLOC: Alloc = Alloc;

fn main() {
    let _prof = Profiler::builder().file_name("dhat-build.json").build();

    let opts = DictOptions {
        terms: 1_200,
        chapters: 49,
        body_words: 80,
        refs_per_term: 5,
        repeat_every: 5,
    };

    let site = make_site(&opts);
    build_at(site.path()).expect("build succeeds");
}
