use indexmap::IndexMap;

use super::{
    AddBlock, BlockKind, DotBlock, FragmentOutputBlock, InputBlock, MultiplyBlock, TransformBlock,
    VertexOutputBlock,
};
use crate::{Error, Result};

pub type BlockFactory = fn() -> Box<dyn BlockKind>;

fn create_default<K: BlockKind + Default + 'static>() -> Box<dyn BlockKind> {
    Box::new(K::default())
}

/// Maps class names to constructors, for loading documents and replaying scripts.
#[derive(Debug, Clone)]
pub struct BlockRegistry {
    factories: IndexMap<&'static str, BlockFactory>,
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::stock()
    }
}

impl BlockRegistry {
    /// Registry with no classes.
    pub fn new() -> Self {
        Self {
            factories: IndexMap::new(),
        }
    }

    /// Registry with every built-in block class.
    pub fn stock() -> Self {
        let mut registry = Self::new();
        registry
            .register_default::<InputBlock>()
            .register_default::<MultiplyBlock>()
            .register_default::<AddBlock>()
            .register_default::<DotBlock>()
            .register_default::<TransformBlock>()
            .register_default::<VertexOutputBlock>()
            .register_default::<FragmentOutputBlock>();
        registry
    }

    pub fn register(&mut self, class: &'static str, factory: BlockFactory) -> &mut Self {
        self.factories.insert(class, factory);
        self
    }

    /// Register `K` under its own class name, constructed with `Default`.
    pub fn register_default<K: BlockKind + Default + 'static>(&mut self) -> &mut Self {
        let class = K::default().class_name();
        self.register(class, create_default::<K>)
    }

    pub fn create(&self, class: &str) -> Result<Box<dyn BlockKind>> {
        self.factories
            .get(class)
            .map(|factory| factory())
            .ok_or_else(|| Error::UnknownBlockClass(class.to_string()))
    }

    pub fn contains(&self, class: &str) -> bool {
        self.factories.contains_key(class)
    }

    pub fn class_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }
}
