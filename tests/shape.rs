//! Structural blocks convert to elements of the same shape at any depth.

use proptest::prelude::*;

use viewxml::prelude::*;

fn arb_attrs() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[a-z][a-z0-9-]{0,6}", "[ -~]{0,10}"), 0..4)
}

fn with_attrs(block: Block, attrs: Vec<(String, String)>) -> Block {
    attrs
        .into_iter()
        .fold(block, |block, (name, value)| block.attr(name, value))
}

fn arb_leaf() -> impl Strategy<Value = Block> {
    let tags = prop::sample::select(vec!["Empty", "Divider", "Formula", "BigNumber"]);
    (tags, arb_attrs()).prop_map(|(tag, attrs)| with_attrs(Block::leaf(tag), attrs))
}

fn arb_text() -> impl Strategy<Value = Block> {
    let tags = prop::sample::select(vec!["Text", "HTML", "Code"]);
    (tags, "[a-zA-Z0-9 <>&\\]\n]{0,16}", arb_attrs())
        .prop_map(|(tag, content, attrs)| with_attrs(Block::text_block(tag, content), attrs))
}

fn arb_block() -> impl Strategy<Value = Block> {
    let base = prop_oneof![arb_leaf(), arb_text()];
    base.prop_recursive(6, 64, 5, |inner| {
        let tags = prop::sample::select(vec!["Group", "Select", "Toggle"]);
        (tags, prop::collection::vec(inner, 0..5), arb_attrs()).prop_map(
            |(tag, children, attrs)| with_attrs(Block::container(tag, children), attrs),
        )
    })
}

fn block_count(block: &Block) -> usize {
    match block {
        Block::Container(c) => 1 + c.children.iter().map(block_count).sum::<usize>(),
        _ => 1,
    }
}

/// Compare `elem` against the block it was built from.
fn assert_mirrors(block: &Block, elem: &Element) -> Result<(), TestCaseError> {
    prop_assert_eq!(elem.tag.as_str(), block.tag());
    prop_assert_eq!(&elem.attrs, block.attrs());
    match block {
        Block::Leaf(_) => prop_assert!(elem.is_empty()),
        Block::Text(text) => {
            prop_assert_eq!(elem.child_count(), 1);
            let cdata = elem.children[0].as_cdata();
            prop_assert_eq!(cdata.map(|c| c.content.as_str()), Some(text.content.as_str()));
        }
        Block::Container(container) => {
            prop_assert_eq!(elem.child_count(), container.children.len());
            for (child, node) in container.children.iter().zip(&elem.children) {
                let child_elem = node.as_element();
                prop_assert!(child_elem.is_some());
                if let Some(child_elem) = child_elem {
                    assert_mirrors(child, child_elem)?;
                }
            }
        }
        Block::Interactive(_) | Block::Asset(_) => unreachable!("not generated"),
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_structure_is_mirrored(root in arb_block(), fragment in any::<bool>()) {
        let view = if fragment { View::fragment(root) } else { View::new(root) };
        let writers = WriterRegistry::with_defaults();
        let mut store = MemoryStore::new();
        let doc = XmlVisitor::new(&mut store, &writers).visit(&view).unwrap();

        prop_assert_eq!(doc.root.tag.as_str(), "View");
        let flag = if fragment { "true" } else { "false" };
        prop_assert_eq!(doc.root.get_attr("fragment"), Some(flag));
        prop_assert_eq!(doc.root.child_count(), 1);
        prop_assert_eq!(doc.element_count(), block_count(&view.root) + 1);
        prop_assert_eq!(store.files(), 0);

        let top = doc.root.first_child().unwrap();
        assert_mirrors(&view.root, top)?;
    }
}
