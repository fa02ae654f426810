mod node;
mod raw_llrb_map;

pub(crate) use raw_llrb_map::RawLlrbMap;
