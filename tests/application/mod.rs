mod sentence_segmenter_test;
mod vector_retrieval_gateway_test;
