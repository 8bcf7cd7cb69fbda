use flexstr::SharedStr as FlexStr;

// an extracted identifier, eg. "1.2.3.-", "ko:K00001" or "abc:def_ghi"
pub type Annotation = FlexStr;

// an EC number or a KO number read from a pathway tool input file
pub type EnzymeId = FlexStr;

// eg. "path:map00010"
pub type PathwayId = FlexStr;

pub type Count = usize;
