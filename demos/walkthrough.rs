//! Step-by-step walkthrough of both heaps
//!
//! Runs the same sequence of operations on a Fibonacci heap and a Hollow heap
//! and prints the tree structure after every step:
//!
//! 1. insert 22, 16, 8, 13, 4, 12, 6, 5, 11
//! 2. delete_min (4)
//! 3. delete_min (5)
//! 4. decrease_key 22 -> 10
//! 5. delete_min (6)
//! 6. delete the non-minimum node 10
//! 7. merge with a heap holding 32, 10, 15
//!
//! ## Running
//!
//! ```bash
//! cargo run --example walkthrough
//!
//! # Also print the raw link table after every step
//! cargo run --example walkthrough -- --links
//! ```

use mergeable_heaps::fibonacci::FibonacciHeap;
use mergeable_heaps::hollow::HollowHeap;
use mergeable_heaps::render::{render_link_table, render_tree, RenderOptions};
use mergeable_heaps::{DecreaseKeyHeap, Heap, Inspect};

const VALUES: [i32; 9] = [22, 16, 8, 13, 4, 12, 6, 5, 11];
const MERGED: [i32; 3] = [32, 10, 15];

fn show<H: Inspect<i32, i32>>(heap: &H, title: &str, links: bool) {
    let options = RenderOptions {
        show_values: false,
        max_depth: None,
    };
    println!("{title}");
    println!("{}", render_tree(heap, &options));
    if links {
        println!("{}", render_link_table(heap));
    }
    println!();
}

fn run<H>(name: &str, links: bool) -> Result<(), mergeable_heaps::HeapError>
where
    H: DecreaseKeyHeap<i32, i32> + Inspect<i32, i32>,
{
    println!("--- {name} ---");
    let mut heap = H::new();

    let mut handles: Vec<<H as Heap<i32, i32>>::Handle> =
        VALUES.iter().map(|&k| heap.insert_key(k)).collect();
    show(&heap, &format!("1. inserted {VALUES:?}"), links);

    heap.delete_min();
    show(&heap, "2. deleted the minimum (4)", links);

    heap.delete_min();
    show(&heap, "3. deleted the minimum (5)", links);

    handles[0] = heap.decrease_key(&handles[0], 10)?;
    show(&heap, "4. decreased 22 to 10", links);

    heap.delete_min();
    show(&heap, "5. deleted the minimum (6)", links);

    heap.delete(&handles[0])?;
    show(&heap, "6. deleted the non-minimum node 10", links);

    let mut other = H::new();
    for k in MERGED {
        other.insert_key(k);
    }
    heap.merge(other);
    show(&heap, &format!("7. merged with {MERGED:?}"), links);

    Ok(())
}

fn main() -> Result<(), mergeable_heaps::HeapError> {
    let links = std::env::args().any(|arg| arg == "--links");

    run::<FibonacciHeap<i32, i32>>("FibonacciHeap", links)?;
    run::<HollowHeap<i32, i32>>("HollowHeap", links)?;
    Ok(())
}
